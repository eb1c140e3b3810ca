//! HTTP Basic-auth extractor resolving the requesting [`Tutor`].
//!
//! Credentials are checked against the per-tutor argon2 hash in the store.
//! Every failure mode collapses to 401; unknown usernames are not
//! distinguished from wrong passwords.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;

use paddock_core::{store::AnimalStore, tutor::Tutor};

use crate::{AppState, error::ApiError};

/// Present in a handler's signature means the request carried valid
/// credentials; the resolved tutor is the owner scope for everything the
/// handler does.
pub struct CurrentTutor(pub Tutor);

/// Hash a plaintext password into an argon2 PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))
}

/// Verify credentials directly from headers and resolve the tutor row.
pub async fn authenticate<S>(
  headers: &HeaderMap,
  store: &S,
) -> Result<Tutor, ApiError>
where
  S: AnimalStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  let stored = store
    .find_tutor_by_username(username)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or(ApiError::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&stored.password_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(stored.tutor)
}

impl<S> FromRequestParts<AppState<S>> for CurrentTutor
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let tutor = authenticate(&parts.headers, state.store.as_ref()).await?;
    Ok(CurrentTutor(tutor))
  }
}
