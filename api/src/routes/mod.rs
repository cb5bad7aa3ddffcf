//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/topics` → Topic listing (students and above), topic/category management and
//!   CSV import (admins)

use crate::routes::{
    health::health_routes,
    topics::{collection_routes, topics_routes},
};
use axum::{Router, extract::DefaultBodyLimit};
use util::{config::AppConfig, state::AppState};

pub mod health;
pub mod topics;

/// Builds the router for every HTTP endpoint, ready to be nested under `/api`.
///
/// Request bodies (JSON and multipart) are capped at `MAX_UPLOAD_BYTES`.
pub fn routes(app_state: AppState) -> Router {
    let max_upload_bytes = AppConfig::global().max_upload_bytes;

    Router::new()
        .nest("/health", health_routes())
        .nest("/topics", topics_routes())
        .route("/topics/", collection_routes())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(app_state)
}
