use axum::{
    Json,
    extract::{
        Multipart, Query, State, multipart::MultipartRejection, rejection::JsonRejection,
    },
    http::{HeaderName, StatusCode, header::CACHE_CONTROL},
    response::{IntoResponse, Response},
};
use services::topic_service::TopicService;
use util::{
    cache::{CLEAR_CACHE, CLEAR_SITE_DATA, NO_STORE},
    state::AppState,
    validation::format_validation_errors,
};
use validator::Validate;

use super::common::{CategoryRequest, CreateTopicRequest, PeriodQuery, topic_error_response};
use crate::response::{ApiResponse, Empty};

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

fn is_csv(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("text/csv"))
}

/// POST /api/topics/upload?period={period}
///
/// Bulk-creates topics from a CSV file sent as the multipart field `file`.
///
/// ### CSV format
/// Header row with the columns `topic`, `category`, `tutor_email`, `capacity` in any
/// order; `capacity` may be left empty (defaults to 1).
///
/// ```text
/// topic,category,tutor_email,capacity
/// Graph Algorithms,Algorithms,ada@example.com,2
/// Query Planning,Databases,grace@example.com,
/// ```
///
/// The import is all-or-nothing. On success the response asks the browser to drop
/// cached data (`Cache-Control: no-store`, `Clear-Site-Data: "cache"`) so the next
/// listing reflects the new topics.
///
/// ### Responses
/// - `201 Created` with the created topics in file order
/// - `400 Bad Request` missing `file`, column mismatch, or an invalid row
/// - `401` / `403` missing token or not an admin
/// - `404 Not Found` a tutor is not registered for the period
/// - `409 Conflict` a topic already exists in the period or repeats in the file
/// - `415 Unsupported Media Type` file is not `text/csv`
/// - `422 Unprocessable Entity` missing or malformed `period`
/// - `500 Internal Server Error`
pub async fn upload_topics(
    State(app_state): State<AppState>,
    Query(query): Query<PeriodQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let period = match query.required() {
        Ok(period) => period,
        Err(response) => return response,
    };

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    let mut content: Option<String> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return error_response(err.status(), err.body_text()),
        };

        if field.name() != Some("file") {
            continue;
        }
        if !is_csv(field.content_type()) {
            return error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "CSV file must be provided.",
            );
        }

        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return error_response(err.status(), err.body_text()),
        };
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => content = Some(text),
            Err(_) => {
                return error_response(StatusCode::BAD_REQUEST, "CSV file must be UTF-8 encoded");
            }
        }
    }

    let Some(content) = content else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'file' field");
    };

    match TopicService::new(app_state.db_clone())
        .create_topics_from_csv(&period, &content)
        .await
    {
        Ok(topics) => (
            StatusCode::CREATED,
            [
                (CACHE_CONTROL, NO_STORE),
                (HeaderName::from_static(CLEAR_SITE_DATA), CLEAR_CACHE),
            ],
            Json(ApiResponse::success(topics, "Topics uploaded successfully")),
        )
            .into_response(),
        Err(err) => topic_error_response(err),
    }
}

/// POST /api/topics/category
///
/// ### Request Body
/// ```json
/// { "name": "Algorithms" }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ id, name }`
/// - `400 Bad Request` empty name or malformed JSON
/// - `401` / `403` missing token or not an admin
/// - `409 Conflict` a category with that name (ignoring case) exists
/// - `422 Unprocessable Entity` body has no `name`
/// - `500 Internal Server Error`
pub async fn create_category(
    State(app_state): State<AppState>,
    req: Result<Json<CategoryRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match TopicService::new(app_state.db_clone())
        .add_category(&req.name)
        .await
    {
        Ok(category) => (
            StatusCode::CREATED,
            [(CACHE_CONTROL, NO_STORE)],
            Json(ApiResponse::success(category, "Category created successfully")),
        )
            .into_response(),
        Err(err) => topic_error_response(err),
    }
}

/// POST /api/topics?period={period}
///
/// ### Request Body
/// ```json
/// {
///   "name": "Graph Algorithms",
///   "category": "Algorithms",
///   "tutor_email": "ada@example.com",
///   "capacity": 2
/// }
/// ```
/// The category is created if it does not exist yet.
///
/// ### Responses
/// - `201 Created` with the expanded topic
/// - `400 Bad Request` validation failure or malformed JSON
/// - `401` / `403` missing token or not an admin
/// - `404 Not Found` tutor not registered for the period
/// - `409 Conflict` topic already exists in the period
/// - `422 Unprocessable Entity` missing or malformed `period`, or a required body field is missing
/// - `500 Internal Server Error`
pub async fn create_topic(
    State(app_state): State<AppState>,
    Query(query): Query<PeriodQuery>,
    req: Result<Json<CreateTopicRequest>, JsonRejection>,
) -> Response {
    let period = match query.required() {
        Ok(period) => period,
        Err(response) => return response,
    };
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    match TopicService::new(app_state.db_clone())
        .add_topic(&period, &req.into())
        .await
    {
        Ok(topic) => (
            StatusCode::CREATED,
            [(CACHE_CONTROL, NO_STORE)],
            Json(ApiResponse::success(topic, "Topic created successfully")),
        )
            .into_response(),
        Err(err) => topic_error_response(err),
    }
}
