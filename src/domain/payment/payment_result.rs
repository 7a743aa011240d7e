//! Result value returned by every gateway-facing operation.
//!
//! Purely structural: callers validate upstream, these constructors only
//! stamp the gateway name and payment type.

use serde::Serialize;

use super::event_normalizer::{CanonicalEventKind, GatewayFee, NormalizedPaymentDetails};

/// Gateway name stamped on every result.
pub const PAYMENT_GATEWAY: &str = "adyen";

/// Payment flow a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentType {
    #[serde(rename = "adyen")]
    OneTime,
    #[serde(rename = "adyen_recurring")]
    Recurring,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::OneTime => "adyen",
            PaymentType::Recurring => "adyen_recurring",
        }
    }

    /// Payment type matching a notification's event kind.
    pub fn for_event_kind(kind: CanonicalEventKind) -> Self {
        if kind.is_recurring() {
            PaymentType::Recurring
        } else {
            PaymentType::OneTime
        }
    }
}

/// Outcome of a gateway operation. There is no partial state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PaymentResult {
    Success(PaymentSuccess),
    Error(PaymentFailure),
}

impl PaymentResult {
    /// Start a success result for the given payment type.
    pub fn success(payment_type: PaymentType) -> PaymentSuccess {
        PaymentSuccess {
            gateway: PAYMENT_GATEWAY,
            payment_type,
            external_payment_id: None,
            external_subscription_id: None,
            amount_cents: None,
            amount_currency: None,
            payment_token: None,
            payment_gateway_fee: None,
            provider_status: None,
            action: None,
        }
    }

    /// Create an error result.
    pub fn error(payment_type: PaymentType, message: impl Into<String>) -> PaymentFailure {
        PaymentFailure {
            gateway: PAYMENT_GATEWAY,
            payment_type,
            message: message.into(),
            code: None,
        }
    }

    /// Build the result for an authenticated notification.
    ///
    /// A notification not reporting success becomes an error carrying Adyen's
    /// reason, or a generic message when no reason was sent.
    pub fn from_notification(
        kind: CanonicalEventKind,
        details: &NormalizedPaymentDetails,
    ) -> PaymentResult {
        let payment_type = PaymentType::for_event_kind(kind);

        if !details.is_success() {
            let message = details
                .reason
                .clone()
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| "Payment notification reported failure".to_string());
            // Notifications carry no provider error code.
            return PaymentResult::error(payment_type, message).build();
        }

        let mut success = PaymentResult::success(payment_type);
        success.external_payment_id = details.external_payment_id.clone();
        success.external_subscription_id = details.external_subscription_id.clone();
        success.amount_cents = details.amount_cents;
        success.amount_currency = details.amount_currency.clone();
        success.payment_gateway_fee = details.payment_gateway_fee.clone();
        success.provider_status = details.event_code.clone();
        success.build()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PaymentResult::Success(_))
    }

    pub fn payment_type(&self) -> PaymentType {
        match self {
            PaymentResult::Success(success) => success.payment_type,
            PaymentResult::Error(failure) => failure.payment_type,
        }
    }

    pub fn gateway(&self) -> &'static str {
        match self {
            PaymentResult::Success(success) => success.gateway,
            PaymentResult::Error(failure) => failure.gateway,
        }
    }
}

/// Successful gateway outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSuccess {
    pub gateway: &'static str,
    pub payment_type: PaymentType,
    pub external_payment_id: Option<String>,
    pub external_subscription_id: Option<String>,
    pub amount_cents: Option<i64>,
    pub amount_currency: Option<String>,
    /// Token for charging the shopper again (stored payment method id).
    pub payment_token: Option<String>,
    pub payment_gateway_fee: Option<GatewayFee>,
    /// Adyen result code or status (e.g., "Authorised", "received").
    pub provider_status: Option<String>,
    /// Follow-up action the shopper must complete (e.g., a redirect).
    pub action: Option<serde_json::Value>,
}

impl PaymentSuccess {
    pub fn external_payment_id(mut self, id: impl Into<String>) -> Self {
        self.external_payment_id = Some(id.into());
        self
    }

    pub fn external_subscription_id(mut self, id: impl Into<String>) -> Self {
        self.external_subscription_id = Some(id.into());
        self
    }

    pub fn amount(mut self, cents: i64, currency: impl Into<String>) -> Self {
        self.amount_cents = Some(cents);
        self.amount_currency = Some(currency.into());
        self
    }

    pub fn payment_token(mut self, token: impl Into<String>) -> Self {
        self.payment_token = Some(token.into());
        self
    }

    pub fn gateway_fee(mut self, fee: GatewayFee) -> Self {
        self.payment_gateway_fee = Some(fee);
        self
    }

    pub fn provider_status(mut self, status: impl Into<String>) -> Self {
        self.provider_status = Some(status.into());
        self
    }

    pub fn action(mut self, action: serde_json::Value) -> Self {
        self.action = Some(action);
        self
    }

    pub fn build(self) -> PaymentResult {
        PaymentResult::Success(self)
    }
}

/// Failed gateway outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentFailure {
    pub gateway: &'static str,
    pub payment_type: PaymentType,
    pub message: String,
    /// Provider error code (if available).
    pub code: Option<String>,
}

impl PaymentFailure {
    /// Attach the provider's error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn build(self) -> PaymentResult {
        PaymentResult::Error(self)
    }
}

impl From<PaymentSuccess> for PaymentResult {
    fn from(success: PaymentSuccess) -> Self {
        success.build()
    }
}

impl From<PaymentFailure> for PaymentResult {
    fn from(failure: PaymentFailure) -> Self {
        failure.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::event_normalizer::PaymentStatus;

    fn details(status: PaymentStatus) -> NormalizedPaymentDetails {
        NormalizedPaymentDetails {
            attempt_token: None,
            amount_currency: Some("USD".to_string()),
            amount_cents: Some(1000),
            status,
            external_payment_id: Some("PSP1".to_string()),
            external_subscription_id: None,
            email: None,
            contact: None,
            event_code: Some("AUTHORISATION".to_string()),
            payment_gateway_fee: Some(GatewayFee {
                cents: 30,
                currency: "USD".to_string(),
            }),
            reason: None,
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Constructor Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn success_stamps_gateway_and_type() {
        let result = PaymentResult::success(PaymentType::OneTime)
            .external_payment_id("PSP1")
            .amount(1000, "USD")
            .build();

        assert!(result.is_success());
        assert_eq!(result.gateway(), "adyen");
        assert_eq!(result.payment_type(), PaymentType::OneTime);
    }

    #[test]
    fn error_carries_message_and_code() {
        let result = PaymentResult::error(PaymentType::Recurring, "Refused")
            .with_code("2")
            .build();

        match result {
            PaymentResult::Error(failure) => {
                assert_eq!(failure.gateway, "adyen");
                assert_eq!(failure.payment_type, PaymentType::Recurring);
                assert_eq!(failure.message, "Refused");
                assert_eq!(failure.code.as_deref(), Some("2"));
            }
            _ => panic!("Expected Error result"),
        }
    }

    #[test]
    fn payment_type_serializes_as_gateway_tag() {
        let json = serde_json::to_value(PaymentType::Recurring).unwrap();
        assert_eq!(json, serde_json::json!("adyen_recurring"));
        assert_eq!(PaymentType::OneTime.as_str(), "adyen");
    }

    #[test]
    fn result_serializes_with_tag() {
        let result = PaymentResult::error(PaymentType::OneTime, "boom").build();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["result"], "error");
        assert_eq!(json["gateway"], "adyen");
        assert_eq!(json["payment_type"], "adyen");
    }

    // ══════════════════════════════════════════════════════════════
    // Notification Result Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn successful_notification_builds_success() {
        let result = PaymentResult::from_notification(
            CanonicalEventKind::OneTimeCharged,
            &details(PaymentStatus::Success),
        );

        match result {
            PaymentResult::Success(success) => {
                assert_eq!(success.payment_type, PaymentType::OneTime);
                assert_eq!(success.external_payment_id.as_deref(), Some("PSP1"));
                assert_eq!(success.amount_cents, Some(1000));
                assert_eq!(success.payment_gateway_fee.unwrap().cents, 30);
            }
            _ => panic!("Expected Success result"),
        }
    }

    #[test]
    fn failed_notification_builds_error_with_reason() {
        let mut failed = details(PaymentStatus::Failure);
        failed.reason = Some("Refused".to_string());

        let result = PaymentResult::from_notification(CanonicalEventKind::OneTimeCharged, &failed);

        match result {
            PaymentResult::Error(failure) => {
                assert_eq!(failure.message, "Refused");
                assert!(failure.code.is_none());
            }
            _ => panic!("Expected Error result"),
        }
    }

    #[test]
    fn failed_notification_without_reason_uses_generic_message() {
        let result = PaymentResult::from_notification(
            CanonicalEventKind::OneTimeCharged,
            &details(PaymentStatus::Failure),
        );

        match result {
            PaymentResult::Error(failure) => {
                assert_eq!(failure.message, "Payment notification reported failure");
            }
            _ => panic!("Expected Error result"),
        }
    }

    #[test]
    fn recurring_kind_builds_recurring_type() {
        let result = PaymentResult::from_notification(
            CanonicalEventKind::RecurringCharged,
            &details(PaymentStatus::Success),
        );

        assert_eq!(result.payment_type(), PaymentType::Recurring);
    }
}
