//! Handlers for the `/animals` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/animals` | Caller's animals only |
//! | `POST`   | `/animals` | Owner is the caller |
//! | `GET`    | `/animals/{id}` | 404 unless owned |
//! | `PUT`    | `/animals/{id}` | Full replace of client-writable fields |
//! | `PATCH`  | `/animals/{id}` | Partial update |
//! | `DELETE` | `/animals/{id}` | 204 |
//!
//! Records owned by someone else are indistinguishable from missing ones.
//! The thought columns are absent from every write body here; only the
//! thought pipeline sets them.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use uuid::Uuid;

use paddock_core::{
  animal::{Animal, AnimalPatch, NewAnimal},
  store::AnimalStore,
};

use crate::{AppState, auth::CurrentTutor, error::ApiError};

fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> ApiError {
  ApiError::Store(Box::new(e))
}

fn invalid(e: paddock_core::Error) -> ApiError {
  ApiError::BadRequest(e.to_string())
}

/// Fetch an animal and enforce owner-equality; anything else is a 404.
async fn owned_animal<S>(
  store: &S,
  id: Uuid,
  tutor_id: Uuid,
) -> Result<Animal, ApiError>
where
  S: AnimalStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let animal = store
    .get_animal(id)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("animal {id} not found")))?;

  if animal.tutor_id != tutor_id {
    return Err(ApiError::NotFound(format!("animal {id} not found")));
  }
  Ok(animal)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /animals`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentTutor(tutor): CurrentTutor,
) -> Result<Json<Vec<Animal>>, ApiError>
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let animals = state
    .store
    .list_animals_by_tutor(tutor.tutor_id)
    .await
    .map_err(store_err)?;
  Ok(Json(animals))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /animals`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentTutor(tutor): CurrentTutor,
  Json(body): Json<NewAnimal>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  body.validate().map_err(invalid)?;

  let animal = state
    .store
    .add_animal(tutor.tutor_id, body)
    .await
    .map_err(store_err)?;
  Ok((StatusCode::CREATED, Json(animal)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /animals/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentTutor(tutor): CurrentTutor,
  Path(id): Path<Uuid>,
) -> Result<Json<Animal>, ApiError>
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let animal = owned_animal(state.store.as_ref(), id, tutor.tutor_id).await?;
  Ok(Json(animal))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /animals/{id}`
pub async fn replace<S>(
  State(state): State<AppState<S>>,
  CurrentTutor(tutor): CurrentTutor,
  Path(id): Path<Uuid>,
  Json(body): Json<NewAnimal>,
) -> Result<Json<Animal>, ApiError>
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  body.validate().map_err(invalid)?;
  owned_animal(state.store.as_ref(), id, tutor.tutor_id).await?;

  let animal = state
    .store
    .replace_animal(id, body)
    .await
    .map_err(store_err)?;
  Ok(Json(animal))
}

// ─── Patch ────────────────────────────────────────────────────────────────────

/// `PATCH /animals/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentTutor(tutor): CurrentTutor,
  Path(id): Path<Uuid>,
  Json(body): Json<AnimalPatch>,
) -> Result<Json<Animal>, ApiError>
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  body.validate().map_err(invalid)?;
  owned_animal(state.store.as_ref(), id, tutor.tutor_id).await?;

  let animal = state
    .store
    .patch_animal(id, body)
    .await
    .map_err(store_err)?;
  Ok(Json(animal))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /animals/{id}`
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  CurrentTutor(tutor): CurrentTutor,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  owned_animal(state.store.as_ref(), id, tutor.tutor_id).await?;
  state.store.delete_animal(id).await.map_err(store_err)?;
  Ok(StatusCode::NO_CONTENT)
}
