//! Error types for `paddock-core`.

use thiserror::Error;

/// Violations of the data-model invariants, raised by the `validate` methods
/// on the client-writable input types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("animal name must not be empty")]
  EmptyAnimalName,

  #[error("username must not be empty")]
  EmptyUsername,

  #[error("email must not be empty")]
  EmptyEmail,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
