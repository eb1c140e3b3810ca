//! Tutor — the authenticated pet-owner account.
//!
//! Credentials are argon2 PHC strings; this crate never sees a plaintext
//! password. Hashing and verification live in the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A registered pet owner. The password hash is deliberately not part of this
/// type so it can never leak through API serialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutor {
  pub tutor_id:     Uuid,
  pub username:     String,
  pub email:        String,
  pub display_name: String,
  pub created_at:   DateTime<Utc>,
}

/// A tutor together with the PHC string their password verifies against.
/// Returned only by the credential lookup used during authentication.
#[derive(Debug, Clone)]
pub struct TutorCredentials {
  pub tutor:         Tutor,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Input to [`crate::store::AnimalStore::add_tutor`].
/// `tutor_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTutor {
  pub username:      String,
  pub email:         String,
  /// May be empty; the username stands in for display then.
  pub display_name:  String,
  pub password_hash: String,
}

impl NewTutor {
  /// Check the data-model invariants the storage layer assumes.
  pub fn validate(&self) -> Result<()> {
    if self.username.trim().is_empty() {
      return Err(Error::EmptyUsername);
    }
    if self.email.trim().is_empty() {
      return Err(Error::EmptyEmail);
    }
    Ok(())
  }
}
