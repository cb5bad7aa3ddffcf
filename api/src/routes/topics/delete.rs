use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header::CACHE_CONTROL},
    response::{IntoResponse, Response},
};
use services::topic_service::TopicService;
use util::{cache::NO_STORE, state::AppState};

use super::common::topic_error_response;
use crate::response::{ApiResponse, Empty};

/// DELETE /api/topics/{topic_id}
///
/// ### Responses
/// - `202 Accepted`
/// - `400 Bad Request` non-integer id
/// - `401` / `403` missing token or not an admin
/// - `404 Not Found` no topic with that id
/// - `500 Internal Server Error`
pub async fn delete_topic(
    State(app_state): State<AppState>,
    topic_id: Result<Path<i64>, PathRejection>,
) -> Response {
    let topic_id = match topic_id {
        Ok(Path(id)) => id,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Empty>::error(rejection.body_text())),
            )
                .into_response();
        }
    };

    match TopicService::new(app_state.db_clone()).delete_topic(topic_id).await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            [(CACHE_CONTROL, NO_STORE)],
            Json(ApiResponse::success(Empty, "Topic deleted successfully")),
        )
            .into_response(),
        Err(err) => topic_error_response(err),
    }
}
