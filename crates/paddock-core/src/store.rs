//! The `AnimalStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `paddock-store-sqlite`).
//! Higher layers (`paddock-api`, `paddock-thoughts`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  animal::{Animal, AnimalPatch, NewAnimal},
  tutor::{NewTutor, Tutor, TutorCredentials},
};

/// Abstraction over a Paddock storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
///
/// The thought columns have exactly one write path, [`set_thought`]; every
/// other mutation leaves them untouched.
///
/// [`set_thought`]: AnimalStore::set_thought
pub trait AnimalStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Tutors ────────────────────────────────────────────────────────────

  /// Create and persist a new tutor. Fails if the username or email is
  /// already taken.
  fn add_tutor(
    &self,
    input: NewTutor,
  ) -> impl Future<Output = Result<Tutor, Self::Error>> + Send + '_;

  /// Retrieve a tutor by id. Returns `None` if not found.
  fn get_tutor(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Tutor>, Self::Error>> + Send + '_;

  /// Look up a tutor and their password hash by username — the
  /// authentication path.
  fn find_tutor_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<TutorCredentials>, Self::Error>> + Send + 'a;

  /// Look up a tutor by email. Used to pre-check registration input.
  fn find_tutor_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Tutor>, Self::Error>> + Send + 'a;

  // ── Animals ───────────────────────────────────────────────────────────

  /// Create and persist an animal owned by `tutor_id`.
  fn add_animal(
    &self,
    tutor_id: Uuid,
    input: NewAnimal,
  ) -> impl Future<Output = Result<Animal, Self::Error>> + Send + '_;

  /// Retrieve an animal by id. Returns `None` if not found.
  fn get_animal(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Animal>, Self::Error>> + Send + '_;

  /// List every animal in the store — the scheduled run's input.
  fn list_animals(
    &self,
  ) -> impl Future<Output = Result<Vec<Animal>, Self::Error>> + Send + '_;

  /// List the animals owned by one tutor — the on-demand run's input and the
  /// CRUD listing.
  fn list_animals_by_tutor(
    &self,
    tutor_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Animal>, Self::Error>> + Send + '_;

  /// Replace all client-writable fields of an animal. The owner and the
  /// thought columns are untouched.
  fn replace_animal(
    &self,
    id: Uuid,
    input: NewAnimal,
  ) -> impl Future<Output = Result<Animal, Self::Error>> + Send + '_;

  /// Apply a partial update; fields left `None` are unchanged.
  fn patch_animal(
    &self,
    id: Uuid,
    patch: AnimalPatch,
  ) -> impl Future<Output = Result<Animal, Self::Error>> + Send + '_;

  /// Delete an animal. Fails if the id does not exist.
  fn delete_animal(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Set both thought columns in one write. This is the thought pipeline's
  /// persistence step; re-running simply overwrites the previous value.
  fn set_thought<'a>(
    &'a self,
    id: Uuid,
    thought: &'a str,
    generated_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<Animal, Self::Error>> + Send + 'a;
}
