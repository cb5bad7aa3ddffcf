use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header::CACHE_CONTROL},
    response::{IntoResponse, Response},
};
use services::topic_service::TopicService;
use util::{cache::PRIVATE_CACHE, state::AppState};

use super::common::{PeriodQuery, topic_error_response};
use crate::response::ApiResponse;

/// GET /api/topics?period={period}
///
/// Lists topics ordered by id, optionally restricted to one period. Each topic has
/// its category and tutor expanded.
///
/// ### Responses
/// - `200 OK` with `Cache-Control: private, max-age=60`
/// - `401 Unauthorized` missing or invalid token
/// - `422 Unprocessable Entity` malformed `period`
/// - `500 Internal Server Error`
pub async fn get_topics(
    State(app_state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let period = match query.optional() {
        Ok(period) => period,
        Err(response) => return response,
    };

    let service = TopicService::new(app_state.db_clone());
    let result = match &period {
        Some(period) => service.get_topics_by_period(period).await,
        None => service.get_topics().await,
    };

    match result {
        Ok(topics) => (
            StatusCode::OK,
            [(CACHE_CONTROL, PRIVATE_CACHE)],
            Json(ApiResponse::success(topics, "Topics retrieved successfully")),
        )
            .into_response(),
        Err(err) => topic_error_response(err),
    }
}
