//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `adyen` - Adyen Checkout/Recurring client and transports
//! - `http` - Inbound webhook endpoint (axum)

pub mod adyen;
pub mod http;

pub use adyen::{AdyenClient, HttpTransport, MockTransport};
