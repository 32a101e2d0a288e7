use axum::extract::rejection::BytesRejection;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeetingError {
    /// Request body is not a meeting
    #[error("invalid meeting payload: {0}")]
    Decode(String),

    /// Request body could not be read at all
    #[error("invalid meeting payload: {0}")]
    Body(#[from] BytesRejection),

    #[error("meeting not found: {0}")]
    NotFound(String),

    #[error("invalid meeting id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    /// Driver error text, passed through unchanged
    #[error("{0}")]
    Database(String),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type MeetingResult<T> = Result<T, MeetingError>;

/// Only a bad request body is the client's fault; every lookup or store
/// failure answers 500, with the code telling them apart.
impl From<MeetingError> for AppError {
    fn from(err: MeetingError) -> Self {
        let message = err.to_string();
        match err {
            MeetingError::Decode(_) => AppError::BadRequest(message),
            MeetingError::Body(rejection) => AppError::BodyRejection(rejection),
            MeetingError::NotFound(_) => AppError::MissingDocument(message),
            MeetingError::Database(_) => AppError::Database(message),
            MeetingError::Timeout(_) => AppError::DatabaseTimeout(message),
            MeetingError::InvalidId { .. } | MeetingError::Internal(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for MeetingError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for MeetingError {
    fn from(err: mongodb::error::Error) -> Self {
        MeetingError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for MeetingError {
    fn from(err: serde_json::Error) -> Self {
        MeetingError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::ErrorResponse;
    use http_body_util::BodyExt;

    async fn render(err: MeetingError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_decode_is_400() {
        let err: MeetingError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "INVALID_JSON");
        assert!(body.message.starts_with("invalid meeting payload"));
    }

    #[tokio::test]
    async fn test_not_found_is_500_with_not_found_code() {
        let (status, body) = render(MeetingError::NotFound("65a1b2c3d4e5f60718293a4b".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.message, "meeting not found: 65a1b2c3d4e5f60718293a4b");
    }

    #[tokio::test]
    async fn test_invalid_id_message() {
        let err = MeetingError::InvalidId {
            id: "xyz".into(),
            reason: "bad hex".into(),
        };
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "invalid meeting id 'xyz': bad hex");
    }

    #[tokio::test]
    async fn test_database_error_text_passes_through() {
        let (status, body) = render(MeetingError::Database("connection refused".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(body.message, "connection refused");
    }

    #[tokio::test]
    async fn test_timeout_code() {
        let (status, body) = render(MeetingError::Timeout(Duration::from_secs(5))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "DATABASE_TIMEOUT");
    }
}
