//! [`ThoughtJobRunner`] — drives the pipeline over a batch of animals.
//!
//! The runner is mode-agnostic: the scheduled (global) and on-demand
//! (per-tutor) triggers differ only in which animals they feed it. Animals
//! are processed one at a time; a single animal's failure is recorded and the
//! batch continues.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use paddock_core::{animal::Animal, store::AnimalStore};

use crate::{generator::ThoughtGenerator, prompt::build_prompt};

// ─── Report types ────────────────────────────────────────────────────────────

/// Per-animal outcome, in batch input order.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ThoughtOutcome {
  Generated {
    animal_id: Uuid,
    name:      String,
    thought:   String,
  },
  Failed {
    animal_id: Uuid,
    name:      String,
    error:     String,
  },
}

/// Summary of one pipeline run. Partial failure is normal here — it is
/// reported in-band through `details`, never as an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobReport {
  pub generated_count: usize,
  pub details:         Vec<ThoughtOutcome>,
}

// ─── Runner ──────────────────────────────────────────────────────────────────

pub struct ThoughtJobRunner<S> {
  store:     Arc<S>,
  generator: ThoughtGenerator,
}

impl<S: AnimalStore> ThoughtJobRunner<S> {
  pub fn new(store: Arc<S>, generator: ThoughtGenerator) -> Self {
    Self { store, generator }
  }

  /// Run the pipeline over `animals`, in order.
  ///
  /// Generation itself cannot fail (the generator degrades to its fallback
  /// sentence); what can fail per animal is the persistence step, which is
  /// recorded as a [`ThoughtOutcome::Failed`] entry. Re-running is idempotent
  /// per animal: both thought columns are simply overwritten.
  pub async fn run(&self, animals: &[Animal]) -> JobReport {
    let mut report = JobReport::default();

    for animal in animals {
      let prompt = build_prompt(animal);
      let thought = self.generator.generate(&prompt).await;

      match self
        .store
        .set_thought(animal.animal_id, &thought, Utc::now())
        .await
      {
        Ok(_) => {
          report.generated_count += 1;
          report.details.push(ThoughtOutcome::Generated {
            animal_id: animal.animal_id,
            name:      animal.name.clone(),
            thought,
          });
        }
        Err(e) => {
          tracing::warn!(
            animal_id = %animal.animal_id,
            error = %e,
            "failed to persist generated thought"
          );
          report.details.push(ThoughtOutcome::Failed {
            animal_id: animal.animal_id,
            name:      animal.name.clone(),
            error:     e.to_string(),
          });
        }
      }
    }

    report
  }

  /// Scheduled entry point: every animal in the store.
  pub async fn run_all(&self) -> Result<JobReport, S::Error> {
    let animals = self.store.list_animals().await?;
    Ok(self.run(&animals).await)
  }

  /// On-demand entry point: the animals owned by one tutor. Scope filtering
  /// happens here; the batch logic is identical to the scheduled run.
  pub async fn run_for_tutor(&self, tutor_id: Uuid) -> Result<JobReport, S::Error> {
    let animals = self.store.list_animals_by_tutor(tutor_id).await?;
    Ok(self.run(&animals).await)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
