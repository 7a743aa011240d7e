//! Axum router configuration for the notification webhook.

use axum::{routing::post, Router};

use super::handlers::{handle_adyen_webhook, WebhookAppState};

/// Create the webhook router.
///
/// Webhooks carry no user authentication; every item is verified via its
/// HMAC signature instead.
///
/// # Routes
/// - `POST /adyen` - Handle Adyen notification batches
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/adyen", post(handle_adyen_webhook))
}

/// Create the complete webhook router, mounted at `/webhooks`.
///
/// # Example
///
/// ```ignore
/// let app = webhook_router().with_state(WebhookAppState::new(handler));
/// ```
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new().nest("/webhooks", webhook_routes())
}
