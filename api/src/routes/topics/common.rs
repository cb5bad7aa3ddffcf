use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::topic_service::{TopicError, TopicRequest};
use util::period::Period;
use validator::Validate;

use crate::response::{ApiResponse, Empty};

/// `?period=` query string shared by the listing and creation endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

impl PeriodQuery {
    /// Parses the optional period. A present but malformed value is a `422`.
    pub fn optional(&self) -> Result<Option<Period>, Response> {
        match self.period.as_deref() {
            None => Ok(None),
            Some(raw) => Period::parse(raw)
                .map(Some)
                .map_err(|e| unprocessable(e.to_string())),
        }
    }

    /// Parses a mandatory period. Missing or malformed is a `422`.
    pub fn required(&self) -> Result<Period, Response> {
        self.optional()?
            .ok_or_else(|| unprocessable("Query parameter 'period' is required"))
    }
}

fn unprocessable(message: impl Into<String>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::<Empty>::error(message)),
    )
        .into_response()
}

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, message = "Category name cannot be empty"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(length(min = 1, message = "Topic name cannot be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: String,

    #[validate(email(message = "Tutor email must be a valid email address"))]
    pub tutor_email: String,

    /// Defaults to 1 when omitted.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<i32>,
}

impl From<CreateTopicRequest> for TopicRequest {
    fn from(req: CreateTopicRequest) -> Self {
        TopicRequest {
            name: req.name,
            category: req.category,
            tutor_email: req.tutor_email,
            capacity: req.capacity.unwrap_or(1),
        }
    }
}

/// Maps a service error onto its HTTP status and the standard envelope.
///
/// Database failures are logged and reported with a generic message.
pub fn topic_error_response(err: TopicError) -> Response {
    let status = match &err {
        TopicError::NotFound(_) => StatusCode::NOT_FOUND,
        TopicError::InvalidCsv(_) | TopicError::Validation(_) => StatusCode::BAD_REQUEST,
        TopicError::DuplicateTopic(_) | TopicError::DuplicateCategory(_) => StatusCode::CONFLICT,
        TopicError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error while handling topic request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error("Internal server error")),
            )
                .into_response();
        }
    };

    (status, Json(ApiResponse::<Empty>::error(err.to_string()))).into_response()
}
