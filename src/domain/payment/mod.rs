//! Payment domain module.
//!
//! Authenticates and normalizes Adyen notifications and defines the result
//! model shared by inbound and outbound gateway operations.
//!
//! # Module Structure
//!
//! - `notification` - Typed notification batch and item
//! - `hmac_validator` - Per-item HMAC-SHA256 signature check
//! - `webhook_authenticator` - Fail-closed batch authorization
//! - `event_normalizer` - Event kind mapping and field extraction
//! - `payment_result` - Success/error result constructors
//! - `credentials` - Integration credentials
//! - `payment_method` - Payment methods for one-time charges

mod credentials;
mod event_normalizer;
mod hmac_validator;
mod notification;
mod payment_method;
mod payment_result;
mod webhook_authenticator;
mod webhook_errors;

pub use credentials::{Credentials, GatewayEnvironment};
pub use event_normalizer::{
    extract_details, map_event_kind, CanonicalEventKind, EventKindTable, GatewayFee,
    NormalizedPaymentDetails, PaymentStatus,
};
pub use hmac_validator::{canonical_string, is_valid_notification, sign_notification};
pub use notification::{
    AdditionalData, Amount, NotificationBatch, NotificationItem, NotificationItemEnvelope,
    Split, SuccessFlag,
};
#[cfg(test)]
pub use notification::NotificationItemBuilder;
pub use payment_method::PaymentMethod;
pub use payment_result::{
    PaymentFailure, PaymentResult, PaymentSuccess, PaymentType, PAYMENT_GATEWAY,
};
pub use webhook_authenticator::{authorize, authorize_batch, parse_batch};
pub use webhook_errors::WebhookError;
