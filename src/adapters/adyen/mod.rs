//! Adyen payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Adyen, including:
//! - Route table and environment endpoints
//! - Request bodies for capture, refund, charges, recurring cancel,
//!   credential checks and redirect details
//! - Response interpretation into `PaymentResult`
//!
//! # Security
//!
//! - The API key is sent as `X-API-Key` and held as `secrecy::SecretString`
//! - Inbound notifications are verified in `domain::payment`, not here

mod adyen_client;
mod http_transport;
mod mock_transport;
mod responses;
mod routes;

pub use adyen_client::{AdyenClient, DEFAULT_RETURN_URL};
pub use http_transport::HttpTransport;
pub use mock_transport::{MockTransport, RecordedRequest};
pub use responses::VALID_SUBSCRIPTION_CANCEL_STATUSES;
pub use routes::{ApiSurface, Endpoints, Operation, Route};
