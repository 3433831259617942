//! API error envelope.

use serde::{Deserialize, Serialize};

/// Machine-readable error codes carried in error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required field is missing or malformed
    InvalidRequest = 1001,
    /// The requested resource was not found
    NotFound = 1002,
    /// The request conflicts with an existing resource
    Conflict = 1003,
    /// Storage or other internal failure
    InternalError = 1500,
}

/// Error details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

/// Body of every error response: `{ "error": { "code", "message" } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

impl ErrorResponse {
    /// Creates a new error body
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ApiError {
                code: code as i32,
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = ErrorResponse::new(ErrorCode::NotFound, "Message not found");
        let json = serde_json::to_string(&error).unwrap();

        assert!(json.contains("1002"));
        assert!(json.contains("Message not found"));
        assert_eq!(error.error.code, ErrorCode::NotFound as i32);
    }
}
