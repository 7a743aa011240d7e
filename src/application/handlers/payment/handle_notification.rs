//! HandleNotificationHandler - Command handler for Adyen notification batches.

use std::sync::Arc;

use crate::domain::payment::{
    authorize_batch, extract_details, parse_batch, CanonicalEventKind, Credentials,
    EventKindTable, NormalizedPaymentDetails, PaymentResult, WebhookError,
};

/// Command to handle a notification batch.
#[derive(Debug, Clone)]
pub struct HandleNotificationCommand {
    /// Raw webhook payload.
    pub payload: Vec<u8>,
}

/// One authenticated and normalized notification item.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedNotification {
    pub event_kind: CanonicalEventKind,
    pub details: NormalizedPaymentDetails,
    /// Absent for unrecognized event codes.
    pub result: Option<PaymentResult>,
}

/// Result of notification processing.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleNotificationResult {
    /// Whether Adyen sent the batch from the live platform.
    pub live: bool,
    pub notifications: Vec<ProcessedNotification>,
}

impl HandleNotificationResult {
    /// Number of items with a recognized event kind.
    pub fn recognized_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.event_kind != CanonicalEventKind::Unrecognized)
            .count()
    }
}

/// Handler for processing Adyen notification batches.
///
/// Authenticates the whole batch before looking at any item, then maps each
/// item to an event kind and normalized details. Nothing is persisted or
/// dispatched; the caller decides what to do with the results.
pub struct HandleNotificationHandler {
    credentials: Arc<Credentials>,
    event_kinds: EventKindTable,
}

impl HandleNotificationHandler {
    pub fn new(credentials: Arc<Credentials>) -> Self {
        Self {
            credentials,
            event_kinds: EventKindTable::default(),
        }
    }

    /// Replace the event code table.
    pub fn with_event_kinds(mut self, event_kinds: EventKindTable) -> Self {
        self.event_kinds = event_kinds;
        self
    }

    pub fn handle(
        &self,
        cmd: HandleNotificationCommand,
    ) -> Result<HandleNotificationResult, WebhookError> {
        // 1. Parse once; the same batch is authorized and normalized
        let batch = parse_batch(&cmd.payload)?;

        // 2. Fail closed on the whole batch
        if !authorize_batch(&batch, &self.credentials) {
            return Err(WebhookError::Unauthorized);
        }

        // 3. Normalize every item
        let notifications: Vec<ProcessedNotification> = batch
            .items()
            .flatten()
            .map(|item| {
                let event_kind = item
                    .event_code
                    .as_deref()
                    .map(|code| self.event_kinds.kind_for(code))
                    .unwrap_or(CanonicalEventKind::Unrecognized);
                let details = extract_details(item);

                let result = match event_kind {
                    CanonicalEventKind::Unrecognized => {
                        tracing::debug!(
                            event_code = ?item.event_code,
                            psp_reference = ?item.psp_reference,
                            "Ignoring unrecognized notification event"
                        );
                        None
                    }
                    kind => Some(PaymentResult::from_notification(kind, &details)),
                };

                ProcessedNotification {
                    event_kind,
                    details,
                    result,
                }
            })
            .collect();

        tracing::info!(
            live = batch.is_live(),
            items = notifications.len(),
            "Accepted notification batch"
        );

        Ok(HandleNotificationResult {
            live: batch.is_live(),
            notifications,
        })
    }
}
