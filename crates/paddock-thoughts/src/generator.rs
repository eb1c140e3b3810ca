//! [`ThoughtGenerator`] — client for the Gemini `generateContent` endpoint.
//!
//! The public contract is deliberately infallible: [`ThoughtGenerator::generate`]
//! always returns a sentence. Transient provider errors (429, 503) are retried
//! with a bounded linear backoff; every other failure degrades immediately to
//! [`FALLBACK_THOUGHT`]. Callers need no error-handling branch.
//!
//! The only hard error is at construction time, when the API key is missing.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Returned whenever generation cannot succeed.
pub const FALLBACK_THOUGHT: &str = "Could not generate the thought at this time.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  /// The API key is absent or empty. Surfaced once, at construction.
  #[error("generation API key is not configured")]
  MissingApiKey,

  #[error("http client error: {0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Generation settings, loaded once at process start and handed to
/// [`ThoughtGenerator::new`] — never read ad hoc per call.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
  pub api_key:         String,
  pub model:           String,
  pub base_url:        String,
  /// Bound on a single outbound request.
  pub request_timeout: Duration,
  /// Total attempts, initial call included.
  pub max_attempts:    u32,
  /// Base of the linear backoff: the wait before retry `n` is
  /// `retry_wait * n`.
  pub retry_wait:      Duration,
}

impl GeneratorConfig {
  /// Defaults for everything but the key itself.
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key:         api_key.into(),
      model:           DEFAULT_MODEL.to_string(),
      base_url:        DEFAULT_BASE_URL.to_string(),
      request_timeout: Duration::from_secs(30),
      max_attempts:    3,
      retry_wait:      Duration::from_secs(5),
    }
  }
}

// ─── Status dispatch ─────────────────────────────────────────────────────────

/// How a non-2xx provider status is handled by the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
  /// Rate-limited or overloaded — wait and try again.
  Retryable,
  /// Bad request or bad key — a configuration problem, retrying cannot help.
  Fatal,
  /// Anything else — logged for observability, no retry.
  Unexpected,
}

fn classify(status: StatusCode) -> StatusClass {
  match status.as_u16() {
    429 | 503 => StatusClass::Retryable,
    400 | 401 => StatusClass::Fatal,
    _ => StatusClass::Unexpected,
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
  text: Option<String>,
}

impl GenerateContentResponse {
  /// Text of the first part of the first candidate, if the expected shape is
  /// present.
  fn first_text(&self) -> Option<&str> {
    self
      .candidates
      .first()?
      .content
      .as_ref()?
      .parts
      .first()?
      .text
      .as_deref()
  }
}

// ─── Generator ───────────────────────────────────────────────────────────────

/// Calls the generative-text provider with bounded retries.
///
/// Cloning is cheap — the inner HTTP client is reference-counted.
#[derive(Debug, Clone)]
pub struct ThoughtGenerator {
  client: reqwest::Client,
  config: GeneratorConfig,
}

impl ThoughtGenerator {
  /// Build a generator from configuration. Fails fast if the API key is
  /// absent so a misconfigured deployment is caught at startup, not per call.
  pub fn new(config: GeneratorConfig) -> Result<Self> {
    if config.api_key.trim().is_empty() {
      return Err(Error::MissingApiKey);
    }
    let client = reqwest::Client::builder()
      .timeout(config.request_timeout)
      .build()?;
    Ok(Self { client, config })
  }

  fn endpoint(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model,
    )
  }

  /// The linear backoff slept after transient failure number `attempt`
  /// (1-based): 5 s, 10 s, 15 s with the default configuration.
  fn backoff_delay(&self, attempt: u32) -> Duration {
    self.config.retry_wait * attempt
  }

  /// Generate a thought for `prompt`. Always returns a sentence; on any
  /// unrecoverable condition this is [`FALLBACK_THOUGHT`].
  pub async fn generate(&self, prompt: &str) -> String {
    let body = json!({
      "contents": [{ "parts": [{ "text": prompt }] }]
    });

    for attempt in 1..=self.config.max_attempts {
      let sent = self
        .client
        .post(self.endpoint())
        .header("x-goog-api-key", &self.config.api_key)
        .json(&body)
        .send()
        .await;

      let response = match sent {
        Ok(r) => r,
        Err(e) => {
          // Transport-level failure (DNS, connect, timeout): not retried.
          tracing::warn!(error = %e, "thought generation transport failure");
          return FALLBACK_THOUGHT.to_string();
        }
      };

      let status = response.status();
      if status.is_success() {
        return match response.json::<GenerateContentResponse>().await {
          Ok(parsed) => match parsed.first_text() {
            Some(text) => text.trim().to_string(),
            None => {
              tracing::warn!("generation response missing candidate text");
              FALLBACK_THOUGHT.to_string()
            }
          },
          Err(e) => {
            tracing::warn!(error = %e, "generation response is not valid JSON");
            FALLBACK_THOUGHT.to_string()
          }
        };
      }

      match classify(status) {
        StatusClass::Retryable => {
          let delay = self.backoff_delay(attempt);
          tracing::debug!(
            %status,
            attempt,
            delay_ms = delay.as_millis() as u64,
            "provider busy, backing off"
          );
          tokio::time::sleep(delay).await;
        }
        StatusClass::Fatal => {
          tracing::error!(
            %status,
            "generation request rejected; check the API key and request shape"
          );
          return FALLBACK_THOUGHT.to_string();
        }
        StatusClass::Unexpected => {
          tracing::warn!(%status, "unexpected status from generation API");
          return FALLBACK_THOUGHT.to_string();
        }
      }
    }

    FALLBACK_THOUGHT.to_string()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
