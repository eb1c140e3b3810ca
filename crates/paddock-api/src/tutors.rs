//! Handlers for the `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | Open; body carries the plaintext password once |
//! | `GET`  | `/auth/me` | Requires Basic auth |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use paddock_core::{store::AnimalStore, tutor::{NewTutor, Tutor}};

use crate::{
  AppState,
  auth::{CurrentTutor, hash_password},
  error::ApiError,
};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub username:     String,
  pub email:        String,
  #[serde(default)]
  pub display_name: String,
  pub password:     String,
}

/// `POST /auth/register` — create a tutor account.
///
/// The password is hashed here; the store only ever sees the PHC string.
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AnimalStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.password.is_empty() {
    return Err(ApiError::BadRequest("password must not be empty".to_string()));
  }

  let input = NewTutor {
    username:      body.username.trim().to_string(),
    email:         body.email.trim().to_string(),
    display_name:  body.display_name.trim().to_string(),
    password_hash: hash_password(&body.password)?,
  };
  input
    .validate()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let store = state.store.as_ref();
  if store
    .find_tutor_by_username(&input.username)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some()
  {
    return Err(ApiError::BadRequest("username already in use".to_string()));
  }
  if store
    .find_tutor_by_email(&input.email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_some()
  {
    return Err(ApiError::BadRequest("email already in use".to_string()));
  }

  let tutor = store
    .add_tutor(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(tutor_id = %tutor.tutor_id, "tutor registered");
  Ok((StatusCode::CREATED, Json(tutor)))
}

/// `GET /auth/me` — the authenticated tutor's own profile.
pub async fn me<S>(
  CurrentTutor(tutor): CurrentTutor,
) -> Result<Json<Tutor>, ApiError>
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(tutor))
}
