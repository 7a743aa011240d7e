//! Fail-closed authorization gate for inbound notification batches.
//!
//! A batch may be processed only if the HMAC key is configured, the batch
//! carries at least one item, and every item carries a valid signature.

use super::credentials::Credentials;
use super::hmac_validator::is_valid_notification;
use super::notification::NotificationBatch;
use super::webhook_errors::WebhookError;

/// Parses a raw request body into a notification batch.
///
/// # Errors
///
/// Returns `WebhookError::MalformedRequest` if the body is not JSON or not a
/// JSON object. Fields of an unexpected type are read as absent.
pub fn parse_batch(raw_body: &[u8]) -> Result<NotificationBatch, WebhookError> {
    let value: serde_json::Value = serde_json::from_slice(raw_body)?;
    if !value.is_object() {
        return Err(WebhookError::MalformedRequest(
            "notification body must be a JSON object".to_string(),
        ));
    }

    // Field types are decoded leniently, so any object yields a batch.
    let batch = serde_json::from_value(value)?;
    Ok(batch)
}

/// Decides whether an already parsed batch may be processed.
pub fn authorize_batch(batch: &NotificationBatch, credentials: &Credentials) -> bool {
    let Some(hmac_key) = credentials.hmac_key() else {
        tracing::warn!("Rejecting notification batch: no HMAC key configured");
        return false;
    };

    let items = match batch.notification_items.as_deref() {
        Some(items) if !items.is_empty() => items,
        _ => {
            tracing::warn!("Rejecting notification batch: no notification items");
            return false;
        }
    };

    for (index, envelope) in items.iter().enumerate() {
        let authorized = envelope
            .item
            .as_ref()
            .is_some_and(|item| is_valid_notification(item, hmac_key));

        // One bad item invalidates the whole batch.
        if !authorized {
            tracing::warn!(
                item_index = index,
                psp_reference = ?envelope.item.as_ref().and_then(|i| i.psp_reference.as_deref()),
                "Rejecting notification batch: invalid HMAC signature"
            );
            return false;
        }
    }

    true
}

/// Parses and authorizes a raw notification body.
///
/// # Errors
///
/// Returns `WebhookError::MalformedRequest` if the body cannot be parsed.
/// An unauthorized batch is reported as `Ok(false)`.
pub fn authorize(raw_body: &[u8], credentials: &Credentials) -> Result<bool, WebhookError> {
    let batch = parse_batch(raw_body)?;
    Ok(authorize_batch(&batch, credentials))
}
