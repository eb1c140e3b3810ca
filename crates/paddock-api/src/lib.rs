//! JSON REST API for Paddock.
//!
//! Exposes an axum [`Router`] backed by any [`paddock_core::store::AnimalStore`],
//! plus the on-demand trigger for the thought pipeline. TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, paddock_api::router(state)).await?;
//! ```

pub mod animals;
pub mod auth;
pub mod error;
pub mod thoughts;
pub mod tutors;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};

use paddock_core::store::AnimalStore;
use paddock_thoughts::ThoughtJobRunner;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: AnimalStore> {
  pub store:  Arc<S>,
  pub runner: Arc<ThoughtJobRunner<S>>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: AnimalStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Accounts
    .route("/auth/register", post(tutors::register::<S>))
    .route("/auth/me", get(tutors::me::<S>))
    // Animals
    .route("/animals", get(animals::list::<S>).post(animals::create::<S>))
    .route(
      "/animals/{id}",
      get(animals::get_one::<S>)
        .put(animals::replace::<S>)
        .patch(animals::update::<S>)
        .delete(animals::remove::<S>),
    )
    // Thought pipeline, on-demand
    .route("/thoughts/generate", post(thoughts::generate::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use axum::body::Body;
  use axum::http::{Request, StatusCode, header};
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use paddock_store_sqlite::SqliteStore;
  use paddock_thoughts::{GeneratorConfig, ThoughtGenerator};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use wiremock::matchers::method;
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  async fn make_state(generation_base_url: &str) -> AppState<SqliteStore> {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let generator = ThoughtGenerator::new(GeneratorConfig {
      base_url: generation_base_url.to_string(),
      retry_wait: Duration::from_millis(1),
      ..GeneratorConfig::new("test-key")
    })
    .unwrap();
    let runner = Arc::new(ThoughtJobRunner::new(store.clone(), generator));
    AppState { store, runner }
  }

  /// State for tests that never reach the provider.
  async fn make_state_offline() -> AppState<SqliteStore> {
    make_state("http://127.0.0.1:1/unreachable").await
  }

  fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn oneshot_json(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    auth:   Option<&str>,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
      builder = builder.header(header::AUTHORIZATION, auth);
    }
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn register(state: &AppState<SqliteStore>, username: &str, email: &str) {
    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/auth/register",
      None,
      Some(json!({
        "username": username,
        "email": email,
        "display_name": "Test Tutor",
        "password": "secret",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
  }

  async fn create_animal(
    state: &AppState<SqliteStore>,
    auth:  &str,
    name:  &str,
  ) -> Value {
    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/animals",
      Some(auth),
      Some(json!({ "name": name, "species": "dog", "breed": "Mixed", "age": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
  }

  async fn mock_generation(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
      })))
      .mount(server)
      .await;
  }

  // ── Registration ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_returns_created_profile_without_credentials() {
    let state = make_state_offline().await;
    let (status, body) = oneshot_json(
      state,
      "POST",
      "/auth/register",
      None,
      Some(json!({
        "username": "alice",
        "email": "alice@example.com",
        "display_name": "Alice Santos",
        "password": "secret",
      })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["display_name"], "Alice Santos");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
  }

  #[tokio::test]
  async fn register_rejects_duplicates() {
    let state = make_state_offline().await;
    register(&state, "alice", "alice@example.com").await;

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/auth/register",
      None,
      Some(json!({
        "username": "alice",
        "email": "fresh@example.com",
        "password": "secret",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("username"));

    let (status, body) = oneshot_json(
      state,
      "POST",
      "/auth/register",
      None,
      Some(json!({
        "username": "bruno",
        "email": "alice@example.com",
        "password": "secret",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
  }

  #[tokio::test]
  async fn register_rejects_empty_password() {
    let state = make_state_offline().await;
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/auth/register",
      None,
      Some(json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Auth ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unauthenticated_requests_return_401() {
    let state = make_state_offline().await;

    let mut builder = Request::builder().method("GET").uri("/auth/me");
    builder = builder.header(header::ACCEPT, "application/json");
    let resp = router(state)
      .oneshot(builder.body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn me_returns_profile_for_valid_credentials() {
    let state = make_state_offline().await;
    register(&state, "alice", "alice@example.com").await;

    let (status, body) = oneshot_json(
      state.clone(),
      "GET",
      "/auth/me",
      Some(&basic("alice", "secret")),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");

    let (status, _) = oneshot_json(
      state,
      "GET",
      "/auth/me",
      Some(&basic("alice", "wrong")),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  // ── Animal CRUD ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_and_list_animals() {
    let state = make_state_offline().await;
    register(&state, "alice", "alice@example.com").await;
    let auth = basic("alice", "secret");

    let created = create_animal(&state, &auth, "Rex").await;
    assert_eq!(created["name"], "Rex");
    assert_eq!(created["species"], "dog");
    assert_eq!(created["thought_of_the_day"], Value::Null);
    assert_eq!(created["thought_generated_at"], Value::Null);

    let (status, body) =
      oneshot_json(state, "GET", "/animals", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["animal_id"], created["animal_id"]);
  }

  #[tokio::test]
  async fn create_rejects_empty_name() {
    let state = make_state_offline().await;
    register(&state, "alice", "alice@example.com").await;

    let (status, _) = oneshot_json(
      state,
      "POST",
      "/animals",
      Some(&basic("alice", "secret")),
      Some(json!({ "name": "   ", "species": "cat" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn update_and_delete_round_trip() {
    let state = make_state_offline().await;
    register(&state, "alice", "alice@example.com").await;
    let auth = basic("alice", "secret");

    let created = create_animal(&state, &auth, "Rex").await;
    let id = created["animal_id"].as_str().unwrap().to_string();

    let (status, body) = oneshot_json(
      state.clone(),
      "PUT",
      &format!("/animals/{id}"),
      Some(&auth),
      Some(json!({ "name": "Max", "species": "cat" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Max");
    assert_eq!(body["species"], "cat");
    assert_eq!(body["breed"], Value::Null);

    let (status, body) = oneshot_json(
      state.clone(),
      "PATCH",
      &format!("/animals/{id}"),
      Some(&auth),
      Some(json!({ "age": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 7);
    assert_eq!(body["name"], "Max");

    let (status, _) = oneshot_json(
      state.clone(),
      "DELETE",
      &format!("/animals/{id}"),
      Some(&auth),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = oneshot_json(
      state,
      "GET",
      &format!("/animals/{id}"),
      Some(&auth),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn patch_ignores_thought_fields() {
    let state = make_state_offline().await;
    register(&state, "alice", "alice@example.com").await;
    let auth = basic("alice", "secret");

    let created = create_animal(&state, &auth, "Rex").await;
    let id = created["animal_id"].as_str().unwrap().to_string();

    let (status, body) = oneshot_json(
      state,
      "PATCH",
      &format!("/animals/{id}"),
      Some(&auth),
      Some(json!({ "age": 5, "thought_of_the_day": "I wrote this myself" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 5);
    // The thought columns belong to the pipeline; client input is ignored.
    assert_eq!(body["thought_of_the_day"], Value::Null);
    assert_eq!(body["thought_generated_at"], Value::Null);
  }

  #[tokio::test]
  async fn animals_are_invisible_across_tenants() {
    let state = make_state_offline().await;
    register(&state, "alice", "alice@example.com").await;
    register(&state, "bruno", "bruno@example.com").await;
    let alice = basic("alice", "secret");
    let bruno = basic("bruno", "secret");

    let created = create_animal(&state, &alice, "Rex").await;
    let id = created["animal_id"].as_str().unwrap().to_string();

    let (status, body) =
      oneshot_json(state.clone(), "GET", "/animals", Some(&bruno), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    for (method, body) in [
      ("GET", None),
      ("PUT", Some(json!({ "name": "Stolen", "species": "dog" }))),
      ("PATCH", Some(json!({ "age": 1 }))),
      ("DELETE", None),
    ] {
      let (status, _) = oneshot_json(
        state.clone(),
        method,
        &format!("/animals/{id}"),
        Some(&bruno),
        body,
      )
      .await;
      assert_eq!(status, StatusCode::NOT_FOUND, "method {method}");
    }
  }

  // ── Thought generation ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn generate_requires_auth() {
    let state = make_state_offline().await;
    let (status, _) =
      oneshot_json(state, "POST", "/thoughts/generate", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn generate_updates_only_the_callers_animals() {
    let provider = MockServer::start().await;
    mock_generation(&provider, "What a day to be a dog.").await;

    let state = make_state(&provider.uri()).await;
    register(&state, "alice", "alice@example.com").await;
    register(&state, "bruno", "bruno@example.com").await;
    let alice = basic("alice", "secret");
    let bruno = basic("bruno", "secret");

    create_animal(&state, &alice, "Rex").await;
    create_animal(&state, &alice, "Luna").await;
    create_animal(&state, &bruno, "Mimi").await;

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/thoughts/generate",
      Some(&alice),
      None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generated_count"], 2);
    assert_eq!(body["message"], "2 thoughts generated");
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert!(details.iter().all(|d| d["status"] == "generated"));

    // Alice's animals now carry the thought; Bruno's are untouched.
    let (_, hers) =
      oneshot_json(state.clone(), "GET", "/animals", Some(&alice), None).await;
    assert!(hers.as_array().unwrap().iter().all(|a| {
      a["thought_of_the_day"] == "What a day to be a dog."
        && a["thought_generated_at"] != Value::Null
    }));

    let (_, his) =
      oneshot_json(state, "GET", "/animals", Some(&bruno), None).await;
    assert!(his.as_array().unwrap().iter().all(|a| {
      a["thought_of_the_day"] == Value::Null
    }));
  }

  #[tokio::test]
  async fn generate_returns_200_even_when_the_provider_is_down() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(503))
      .mount(&provider)
      .await;

    let state = make_state(&provider.uri()).await;
    register(&state, "alice", "alice@example.com").await;
    let alice = basic("alice", "secret");
    create_animal(&state, &alice, "Rex").await;

    let (status, body) = oneshot_json(
      state,
      "POST",
      "/thoughts/generate",
      Some(&alice),
      None,
    )
    .await;

    // Degraded generation still persists the fallback sentence; the report
    // communicates outcomes in-band.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generated_count"], 1);
    assert_eq!(
      body["details"][0]["thought"],
      "Could not generate the thought at this time."
    );
  }

  #[tokio::test]
  async fn report_preserves_input_order() {
    let provider = MockServer::start().await;
    mock_generation(&provider, "ordered thinking").await;

    let state = make_state(&provider.uri()).await;
    register(&state, "alice", "alice@example.com").await;
    let alice = basic("alice", "secret");

    for name in ["Rex", "Luna", "Mimi"] {
      create_animal(&state, &alice, name).await;
    }

    let (_, listed) =
      oneshot_json(state.clone(), "GET", "/animals", Some(&alice), None).await;
    let listed_ids: Vec<&str> = listed
      .as_array()
      .unwrap()
      .iter()
      .map(|a| a["animal_id"].as_str().unwrap())
      .collect();

    let (_, body) = oneshot_json(
      state,
      "POST",
      "/thoughts/generate",
      Some(&alice),
      None,
    )
    .await;
    let reported_ids: Vec<&str> = body["details"]
      .as_array()
      .unwrap()
      .iter()
      .map(|d| d["animal_id"].as_str().unwrap())
      .collect();

    assert_eq!(reported_ids, listed_ids);
  }
}
