//! HTTP handlers for the notification webhook.
//!
//! Connects the Axum route to the notification command handler.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::payment::{
    HandleNotificationCommand, HandleNotificationHandler,
};
use crate::domain::payment::WebhookError;

use super::dto::{ErrorResponse, ACCEPTED_BODY};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookAppState {
    pub notification_handler: Arc<HandleNotificationHandler>,
}

impl WebhookAppState {
    pub fn new(notification_handler: HandleNotificationHandler) -> Self {
        Self {
            notification_handler: Arc::new(notification_handler),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhooks/adyen - Handle an Adyen notification batch
pub async fn handle_adyen_webhook(
    State(state): State<WebhookAppState>,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let cmd = HandleNotificationCommand {
        payload: body.to_vec(),
    };

    let result = state.notification_handler.handle(cmd)?;

    for processed in &result.notifications {
        if let Some(payment_result) = &processed.result {
            tracing::info!(
                event_kind = processed.event_kind.as_str(),
                psp_reference = ?processed.details.external_payment_id,
                success = payment_result.is_success(),
                "Processed Adyen notification"
            );
        }
    }

    Ok(ACCEPTED_BODY)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts webhook errors to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let error_code = match &self.0 {
            WebhookError::MalformedRequest(_) => "MALFORMED_REQUEST",
            WebhookError::Unauthorized => "UNAUTHORIZED",
        };

        tracing::warn!(error = %self.0, "Rejected Adyen notification");

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (self.0.status_code(), Json(body)).into_response()
    }
}
