//! Periodic global thought run.

use std::sync::Arc;
use std::time::Duration;

use paddock_core::store::AnimalStore;
use paddock_thoughts::ThoughtJobRunner;
use tokio::time::MissedTickBehavior;

/// Spawn the scheduled thought run on its own task.
///
/// The run executes inline in the task, so a new tick cannot fire until the
/// previous run has finished — runs never overlap. Ticks that would have
/// fired mid-run are coalesced by `MissedTickBehavior::Skip`. The runner is
/// idempotent per animal anyway: a re-run just overwrites the thought
/// columns with a fresh value.
pub fn spawn<S>(runner: Arc<ThoughtJobRunner<S>>, every: Duration)
where
  S: AnimalStore + 'static,
{
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick completes immediately; consume it so the first run
    // happens one full period after startup.
    interval.tick().await;

    loop {
      interval.tick().await;
      match runner.run_all().await {
        Ok(report) => tracing::info!(
          generated = report.generated_count,
          total = report.details.len(),
          "scheduled thought run complete"
        ),
        Err(e) => tracing::warn!(
          error = %e,
          "scheduled thought run could not list animals"
        ),
      }
    }
  });
}
