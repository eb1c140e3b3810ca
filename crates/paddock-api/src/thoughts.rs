//! Handler for `POST /thoughts/generate` — the on-demand pipeline trigger.

use axum::{Json, extract::State};
use serde::Serialize;

use paddock_core::store::AnimalStore;
use paddock_thoughts::ThoughtOutcome;

use crate::{AppState, auth::CurrentTutor, error::ApiError};

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
  pub message:         String,
  pub generated_count: usize,
  pub details:         Vec<ThoughtOutcome>,
}

/// `POST /thoughts/generate`
///
/// Runs the pipeline synchronously over the caller's animals and returns the
/// full report. Always 200: per-animal failures are data in `details`, not an
/// HTTP error — partial failure is normal for a best-effort enrichment.
pub async fn generate<S>(
  State(state): State<AppState<S>>,
  CurrentTutor(tutor): CurrentTutor,
) -> Result<Json<GenerateResponse>, ApiError>
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let report = state
    .runner
    .run_for_tutor(tutor.tutor_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(
    tutor_id = %tutor.tutor_id,
    generated = report.generated_count,
    total = report.details.len(),
    "on-demand thought run complete"
  );

  Ok(Json(GenerateResponse {
    message:         format!("{} thoughts generated", report.generated_count),
    generated_count: report.generated_count,
    details:         report.details,
  }))
}
