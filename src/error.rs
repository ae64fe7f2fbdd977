use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Course ID {0} not found.")]
    NotFound(i64),

    #[error("Request body must be valid JSON.")]
    MalformedBody,

    #[error("Missing required fields: course_code, title, instructor, units")]
    MissingFields,

    #[error("Units must be a valid number.")]
    InvalidUnits,

    #[error("Course code already exists.")]
    DuplicateCourseCode,

    #[error("Invalid or missing API key.")]
    Unauthorized,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Course ID {id} not found."),
            ),
            AppError::MalformedBody | AppError::MissingFields | AppError::InvalidUnits => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            // Duplicate codes report as 400, not 409.
            AppError::DuplicateCourseCode => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal Server Error: {e}"),
                )
            }
        };

        let body = Json(ErrorResponse { message });

        (status, body).into_response()
    }
}
