//! Transport port for outbound gateway HTTP calls.
//!
//! The transport owns the wire: authentication headers, timeouts and
//! connection handling. It never retries.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Port for posting JSON requests to the gateway.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// POST a JSON body to an absolute URL.
    ///
    /// Non-2xx answers are returned as a response, not as an error, so the
    /// caller can read the gateway's error body.
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError>;
}

/// HTTP answer from the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,

    /// Parsed JSON body (`Null` when the body was empty).
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors from the transport itself.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connection could not be established or was interrupted.
    #[error("Network error: {0}")]
    Network(String),

    /// Request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Gateway answered with a body that is not JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Short machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            TransportError::Network(_) => "network_error",
            TransportError::Timeout => "timeout",
            TransportError::InvalidResponse(_) => "invalid_response",
        }
    }
}
