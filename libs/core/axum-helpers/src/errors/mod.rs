pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 2003,
///   "error": "DATABASE_ERROR",
///   "message": "Kind: Server selection timeout ..."
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error text
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain errors convert into this so every endpoint shares one status and
/// code mapping.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// The request body could not be buffered; keeps axum's status (413 when
    /// over the body limit).
    #[error("Body rejected: {0}")]
    BodyRejection(#[from] BytesRejection),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Lookup by a client-supplied key found no document. Answered 500 with
    /// the `NOT_FOUND` code.
    #[error("Missing document: {0}")]
    MissingDocument(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Database timeout: {0}")]
    DatabaseTimeout(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status and code this error is reported with.
    ///
    /// Store failures of any kind are reported as 500; the message carries
    /// the distinction.
    pub fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidJson),
            AppError::BodyRejection(e) => match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => {
                    (StatusCode::PAYLOAD_TOO_LARGE, ErrorCode::PayloadTooLarge)
                }
                status => (status, ErrorCode::InvalidJson),
            },
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            AppError::MissingDocument(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::NotFound)
            }
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
            AppError::DatabaseTimeout(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseTimeout)
            }
            AppError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }

    fn into_message(self) -> String {
        match self {
            AppError::BodyRejection(e) => e.body_text(),
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::MissingDocument(msg)
            | AppError::Database(msg)
            | AppError::DatabaseTimeout(msg)
            | AppError::InternalServerError(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = %self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), error = %self, "Request rejected");
        }

        let body = ErrorResponse::new(code, self.into_message());
        (status, Json(body)).into_response()
    }
}
