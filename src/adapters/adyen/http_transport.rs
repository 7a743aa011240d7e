//! reqwest-backed implementation of `GatewayTransport`.
//!
//! Authenticates with the `X-API-Key` header and applies a per-request
//! timeout. Does not retry.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::ports::{GatewayTransport, TransportError, TransportResponse};

/// Header Adyen reads the API key from.
const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP transport for the Adyen APIs.
pub struct HttpTransport {
    api_key: SecretString,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given API key and request timeout.
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            api_key,
            http_client,
        })
    }
}

#[async_trait]
impl GatewayTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                tracing::warn!(status, error = %e, "Adyen returned a non-JSON body");
                TransportError::InvalidResponse(e.to_string())
            })?
        };

        Ok(TransportResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_builds_with_timeout() {
        let transport = HttpTransport::new(
            SecretString::new("test_api_key".to_string()),
            Duration::from_secs(10),
        );

        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let transport = HttpTransport::new(
            SecretString::new("test_api_key".to_string()),
            Duration::from_secs(2),
        )
        .unwrap();

        let result = transport
            .post_json("http://127.0.0.1:1/v67/payments", &serde_json::json!({}))
            .await;

        assert!(matches!(
            result,
            Err(TransportError::Network(_)) | Err(TransportError::Timeout)
        ));
    }
}
