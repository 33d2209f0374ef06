//! Error handling - maps domain failures to HTTP responses with the JSON
//! error envelope.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use quill_core::error::DomainError;
use quill_shared::{ApiErrorResponse, FieldError};

/// Application-level error type behind every handler.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    Internal(String),
    Validation(Vec<FieldError>),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Validation(errors) => write!(f, "Validation failed ({} errors)", errors.len()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg) => ApiErrorResponse::new(status.as_u16(), msg.clone()),
            ApiError::Unauthorized => {
                ApiErrorResponse::new(status.as_u16(), "Unauthorized".to_string())
            }
            ApiError::Internal(msg) => {
                // Detail stays in the logs, not in the response.
                tracing::error!("Internal error: {}", msg);
                ApiErrorResponse::new(status.as_u16(), "An unexpected error occurred".to_string())
            }
            ApiError::Validation(errors) => {
                ApiErrorResponse::new(status.as_u16(), "Validation failed".to_string())
                    .with_field_errors(errors.clone())
            }
        };

        HttpResponse::build(status).json(body)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Unauthenticated => ApiError::Unauthorized,
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
            DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
