//! Runtime server configuration, deserialised from `config.toml` with a
//! `PADDOCK_*` environment overlay.

use std::path::PathBuf;

use paddock_thoughts::GeneratorConfig;
use serde::Deserialize;

fn default_interval_minutes() -> u64 { 1440 }

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,

  /// Key for the generative-text provider. Empty or missing is a startup
  /// error — generation is configured once, not checked per call.
  pub gemini_api_key: String,
  /// Optional model override; the generator's default otherwise.
  pub gemini_model:   Option<String>,
  /// Optional endpoint override — points the pipeline at a test double.
  pub gemini_base_url: Option<String>,

  /// Cadence of the scheduled global thought run.
  #[serde(default = "default_interval_minutes")]
  pub thought_interval_minutes: u64,
}

impl ServerConfig {
  /// Generator settings with this config's overrides applied.
  pub fn generator_config(&self) -> GeneratorConfig {
    let mut cfg = GeneratorConfig::new(self.gemini_api_key.clone());
    if let Some(model) = &self.gemini_model {
      cfg.model = model.clone();
    }
    if let Some(base_url) = &self.gemini_base_url {
      cfg.base_url = base_url.clone();
    }
    cfg
  }
}
