//! Mock gateway transport for testing.
//!
//! Provides a scripted implementation of `GatewayTransport` for unit and
//! integration tests. Supports:
//! - Queued responses
//! - Error injection
//! - Request tracking

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{GatewayTransport, TransportError, TransportResponse};

/// A request captured by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
}

/// Mock transport for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockTransport::new();
/// mock.push_response(200, json!({"resultCode": "Authorised"}));
///
/// let client = AdyenClient::new(credentials, Arc::new(mock.clone()));
/// client.validate_credentials().await;
///
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Outcomes returned in order; an empty queue answers `200 {}`.
    outcomes: VecDeque<Result<TransportResponse, TransportError>>,

    /// Track requests for assertions.
    requests: Vec<RecordedRequest>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn push_response(&self, status: u16, body: Value) {
        self.lock()
            .outcomes
            .push_back(Ok(TransportResponse::new(status, body)));
    }

    /// Queue a transport error.
    pub fn push_error(&self, error: TransportError) {
        self.lock().outcomes.push_back(Err(error));
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl GatewayTransport for MockTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
        });

        state
            .outcomes
            .pop_front()
            .unwrap_or_else(|| Ok(TransportResponse::new(200, Value::Object(Default::default()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_queued_outcomes_in_order() {
        let mock = MockTransport::new();
        mock.push_response(200, json!({"a": 1}));
        mock.push_error(TransportError::Timeout);

        let first = mock.post_json("http://x/1", &json!({})).await.unwrap();
        let second = mock.post_json("http://x/2", &json!({})).await;

        assert_eq!(first.body, json!({"a": 1}));
        assert!(matches!(second, Err(TransportError::Timeout)));
    }

    #[tokio::test]
    async fn empty_queue_answers_ok() {
        let mock = MockTransport::new();

        let response = mock.post_json("http://x", &json!({})).await.unwrap();

        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn records_requests() {
        let mock = MockTransport::new();

        mock.post_json("http://x/payments", &json!({"k": "v"})).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.url, "http://x/payments");
        assert_eq!(request.body, json!({"k": "v"}));
        assert_eq!(mock.requests().len(), 1);
    }
}
