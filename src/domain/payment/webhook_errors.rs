//! Webhook error types for Adyen notification handling.
//!
//! A malformed body and an unauthorized batch are kept apart so a forged
//! notification can be told from a broken request in logs and alerts.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during notification processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The body could not be parsed as a notification batch.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The batch failed the authorization gate.
    #[error("Unauthorized notification")]
    Unauthorized,
}

impl WebhookError {
    /// Maps the error to an appropriate HTTP status code.
    ///
    /// Adyen retries deliveries that are not acknowledged, so neither case
    /// answers with a 5xx.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::MalformedRequest(err.to_string())
    }
}
