//! DTOs for the notification webhook endpoint.

use serde::Serialize;

/// Body Adyen expects to mark a notification batch as delivered.
pub const ACCEPTED_BODY: &str = "[accepted]";

/// Standard error response for rejected notification batches.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
