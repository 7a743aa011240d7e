//! Normalization of Adyen notification items into provider-agnostic values.
//!
//! Two pure steps: map the provider event code onto a closed set of event
//! kinds, and extract the canonical payment fields from an item.

use serde::Serialize;

use super::notification::NotificationItem;

/// Split type Adyen uses for the gateway's own fee.
const PAYMENT_FEE_SPLIT: &str = "PaymentFee";

/// Provider-agnostic kind of a notification event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalEventKind {
    /// A one-time subscription charge completed.
    OneTimeCharged,
    /// A recurring subscription renewal was charged.
    RecurringCharged,
    /// A recurring subscription was cancelled or halted.
    RecurringCancelled,
    /// Event code with no mapping; callers may ignore it.
    Unrecognized,
}

impl CanonicalEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTimeCharged => "one_time_subscription_charged",
            Self::RecurringCharged => "recurring_subscription_charged",
            Self::RecurringCancelled => "recurring_subscription_cancelled",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Returns true for kinds that belong to recurring subscriptions.
    pub fn is_recurring(&self) -> bool {
        matches!(self, Self::RecurringCharged | Self::RecurringCancelled)
    }
}

/// Adyen event codes the integration acts on.
///
/// Recurring charge and cancel codes get their own entries once the
/// integration processes them.
const ADYEN_EVENT_KINDS: &[(&str, CanonicalEventKind)] =
    &[("AUTHORISATION", CanonicalEventKind::OneTimeCharged)];

/// Immutable lookup table from provider event code to event kind.
#[derive(Debug, Clone, Copy)]
pub struct EventKindTable {
    entries: &'static [(&'static str, CanonicalEventKind)],
}

impl EventKindTable {
    /// Creates a table over the given static entries.
    pub const fn new(entries: &'static [(&'static str, CanonicalEventKind)]) -> Self {
        Self { entries }
    }

    /// Looks up an event code. Unknown codes map to `Unrecognized`.
    pub fn kind_for(&self, provider_code: &str) -> CanonicalEventKind {
        self.entries
            .iter()
            .find(|(code, _)| *code == provider_code)
            .map(|(_, kind)| *kind)
            .unwrap_or(CanonicalEventKind::Unrecognized)
    }

    /// Provider codes the table knows about.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(code, _)| *code)
    }
}

impl Default for EventKindTable {
    fn default() -> Self {
        Self::new(ADYEN_EVENT_KINDS)
    }
}

/// Maps an Adyen event code using the default table.
pub fn map_event_kind(provider_code: &str) -> CanonicalEventKind {
    EventKindTable::default().kind_for(provider_code)
}

/// Payment status reported by a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Success,
    Failure,
}

/// Gateway fee taken from a `PaymentFee` split.
///
/// Cents and currency always travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayFee {
    pub cents: i64,
    pub currency: String,
}

/// Canonical fields extracted from a notification item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPaymentDetails {
    /// Never echoed back by Adyen; callers correlate by `external_payment_id`.
    pub attempt_token: Option<String>,
    pub amount_currency: Option<String>,
    pub amount_cents: Option<i64>,
    pub status: PaymentStatus,
    pub external_payment_id: Option<String>,
    pub external_subscription_id: Option<String>,
    pub email: Option<String>,
    /// Always absent for Adyen.
    pub contact: Option<String>,
    pub event_code: Option<String>,
    pub payment_gateway_fee: Option<GatewayFee>,
    /// Refusal reason, when Adyen supplied one.
    pub reason: Option<String>,
}

impl NormalizedPaymentDetails {
    pub fn payment_gateway_fee_cents(&self) -> Option<i64> {
        self.payment_gateway_fee.as_ref().map(|fee| fee.cents)
    }

    pub fn payment_gateway_fee_currency(&self) -> Option<&str> {
        self.payment_gateway_fee
            .as_ref()
            .map(|fee| fee.currency.as_str())
    }

    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }
}

/// Extracts the canonical payment fields from a notification item.
pub fn extract_details(item: &NotificationItem) -> NormalizedPaymentDetails {
    let amount = item.amount.as_ref();
    let additional_data = item.additional_data.as_ref();

    let status = if item
        .success
        .as_ref()
        .is_some_and(|flag| flag.is_literal_true())
    {
        PaymentStatus::Success
    } else {
        PaymentStatus::Failure
    };

    NormalizedPaymentDetails {
        attempt_token: None,
        amount_currency: amount.and_then(|a| a.currency.clone()),
        amount_cents: amount.and_then(|a| a.value),
        status,
        external_payment_id: item.psp_reference.clone(),
        external_subscription_id: additional_data
            .and_then(|data| data.recurring_detail_reference.clone()),
        email: additional_data.and_then(|data| data.shopper_email.clone()),
        contact: None,
        event_code: item.event_code.clone(),
        payment_gateway_fee: extract_gateway_fee(item),
        reason: item.reason.clone(),
    }
}

/// Reads the fee from the first `PaymentFee` split.
///
/// A fee split missing either value or currency yields no fee at all.
fn extract_gateway_fee(item: &NotificationItem) -> Option<GatewayFee> {
    let split = item
        .splits
        .as_ref()?
        .iter()
        .find(|split| split.split_type.as_deref() == Some(PAYMENT_FEE_SPLIT))?;

    let amount = split.amount.as_ref()?;
    Some(GatewayFee {
        cents: amount.value?,
        currency: amount.currency.clone()?,
    })
}
