//! `/api/topics` route group.
//!
//! Listing is open to every authenticated role; everything that writes is admin-only.

use axum::{
    Router,
    middleware::from_fn,
    routing::{MethodRouter, delete, get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_student};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

use delete::delete_topic;
use get::get_topics;
use post::{create_category, create_topic, upload_topics};

/// `GET` and `POST` on the collection itself.
///
/// Mounted at both `/topics` and `/topics/`; nesting alone only serves the former.
pub fn collection_routes() -> MethodRouter<AppState> {
    get(get_topics)
        .route_layer(from_fn(allow_student))
        .merge(post(create_topic).route_layer(from_fn(allow_admin)))
}

pub fn topics_routes() -> Router<AppState> {
    Router::new()
        .route("/", collection_routes())
        .route("/upload", post(upload_topics).route_layer(from_fn(allow_admin)))
        .route("/category", post(create_category).route_layer(from_fn(allow_admin)))
        .route("/{topic_id}", delete(delete_topic).route_layer(from_fn(allow_admin)))
}
