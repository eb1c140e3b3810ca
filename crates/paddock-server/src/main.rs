//! paddock-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, spawns the scheduled thought run, and serves the
//! REST API over HTTP.
//!
//! # Password hash generation
//!
//! Tutor rows are normally created through `POST /auth/register`. To produce
//! an argon2 PHC string by hand (e.g. for seeding):
//!
//! ```
//! cargo run -p paddock-server --bin server -- --hash-password
//! ```

mod config;
mod scheduler;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use clap::Parser;
use paddock_api::AppState;
use paddock_store_sqlite::SqliteStore;
use paddock_thoughts::{ThoughtGenerator, ThoughtJobRunner};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Paddock pet-record server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = password_from_stdin()?;
    let hash = paddock_api::auth::hash_password(&password)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  // Load configuration.
  let settings = ::config::Config::builder()
    .add_source(::config::File::from(cli.config).required(false))
    .add_source(::config::Environment::with_prefix("PADDOCK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  // The generator is constructed exactly once; a missing API key aborts
  // startup here instead of failing on every scheduled run.
  let generator = ThoughtGenerator::new(server_cfg.generator_config())
    .context("thought generation is misconfigured (set gemini_api_key)")?;
  let runner = Arc::new(ThoughtJobRunner::new(store.clone(), generator));

  scheduler::spawn(
    runner.clone(),
    Duration::from_secs(server_cfg.thought_interval_minutes * 60),
  );

  // Build application state and serve.
  let state = AppState { store, runner };
  let app = paddock_api::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn password_from_stdin() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
