//! HTTP adapter for payment gateway webhooks.
//!
//! - `POST /webhooks/adyen` - Handle Adyen notification batches
//!   (200 `[accepted]`, 401 unauthorized, 400 malformed)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, ACCEPTED_BODY};
pub use handlers::{handle_adyen_webhook, WebhookApiError, WebhookAppState};
pub use routes::{webhook_router, webhook_routes};
