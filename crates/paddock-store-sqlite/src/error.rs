//! Error type for `paddock-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("tutor not found: {0}")]
  TutorNotFound(uuid::Uuid),

  #[error("animal not found: {0}")]
  AnimalNotFound(uuid::Uuid),

  #[error("username already in use: {0:?}")]
  UsernameTaken(String),

  #[error("email already in use: {0:?}")]
  EmailTaken(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
