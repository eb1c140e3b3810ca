//! The thought-of-the-day pipeline.
//!
//! Builds a per-animal prompt, asks the Gemini generative-language API for a
//! short first-person thought, and writes the result back through any
//! [`paddock_core::store::AnimalStore`].
//!
//! The pipeline is best-effort: the generator never fails outward (it
//! degrades to a fixed fallback sentence), and one animal's persistence
//! failure never aborts the batch — it becomes a failure entry in the
//! [`runner::JobReport`].

pub mod generator;
pub mod prompt;
pub mod runner;

pub use generator::{FALLBACK_THOUGHT, GeneratorConfig, ThoughtGenerator};
pub use runner::{JobReport, ThoughtJobRunner, ThoughtOutcome};
