//! Type-safe error codes for API responses.
//!
//! Each code has a SCREAMING_SNAKE_CASE identifier for clients, an integer
//! for logs and metrics, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidJson;
//! assert_eq!(code.as_str(), "INVALID_JSON");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body is not the expected JSON document
    InvalidJson,

    /// Route or resource does not exist
    NotFound,

    /// Request body exceeds the accepted size
    PayloadTooLarge,

    // Server errors
    /// Unexpected failure inside the service
    InternalError,

    // Store errors (2000-2999)
    /// The document store rejected or failed an operation
    DatabaseError,

    /// A store operation exceeded its deadline
    DatabaseTimeout,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseTimeout => "DATABASE_TIMEOUT",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: request and service errors
    /// - 2000-2999: document store errors
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidJson => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::PayloadTooLarge => 1013,
            Self::DatabaseError => 2003,
            Self::DatabaseTimeout => 2013,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidJson => "Request body is not valid JSON for this endpoint",
            Self::NotFound => "The requested resource was not found",
            Self::PayloadTooLarge => "Request body is too large",
            Self::InternalError => "An unexpected error occurred",
            Self::DatabaseError => "A database error occurred",
            Self::DatabaseTimeout => "The database did not answer in time",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 6] = [
        ErrorCode::InvalidJson,
        ErrorCode::NotFound,
        ErrorCode::PayloadTooLarge,
        ErrorCode::InternalError,
        ErrorCode::DatabaseError,
        ErrorCode::DatabaseTimeout,
    ];

    #[test]
    fn test_serde_matches_as_str() {
        for code in ALL {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::json!(code.as_str()));
        }
    }

    #[test]
    fn test_integer_codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code for {code}");
        }
    }

    #[test]
    fn test_store_codes_in_2000_range() {
        assert!((2000..3000).contains(&ErrorCode::DatabaseError.code()));
        assert!((2000..3000).contains(&ErrorCode::DatabaseTimeout.code()));
    }
}
