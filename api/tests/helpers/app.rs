use api::routes::routes;
use axum::{Router, body::to_bytes, response::Response};
use db::test_utils::setup_test_db;
use serde_json::Value;
use util::{config::AppConfig, state::AppState};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Router mounted under `/api` over a fresh, migrated in-memory database.
///
/// The returned state shares the router's connection so tests can seed data directly.
pub async fn make_test_app() -> (Router, AppState) {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);
    AppConfig::set_jwt_duration_minutes(60u64);

    let db = setup_test_db().await.expect("Failed to set up test db");
    let app_state = AppState::new(db);
    let router = Router::new().nest("/api", routes(app_state.clone()));

    (router, app_state)
}

pub async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
