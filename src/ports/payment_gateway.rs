//! Payment gateway port for outbound payment operations.
//!
//! Defines the contract the billing layer uses to talk to a payment gateway.
//! Every operation resolves to a `PaymentResult`; transport failures are
//! reported as error results, never retried at this layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::payment::{PaymentMethod, PaymentResult};

/// Port for outbound payment gateway operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Capture a previously authorised payment.
    async fn capture_payment(&self, payment_id: &str, amount: &Money) -> PaymentResult;

    /// Refund a captured payment, fully or partially.
    async fn refund_payment(&self, payment_id: &str, amount: &Money) -> PaymentResult;

    /// Charge a one-time payment.
    async fn charge_onetime(&self, request: OneTimeChargeRequest) -> PaymentResult;

    /// Charge a subscription renewal against a stored payment method.
    async fn charge_recurring_subscription(&self, request: RecurringChargeRequest)
        -> PaymentResult;

    /// Disable the recurring contract of a shopper.
    ///
    /// Without a detail reference, every stored detail of the shopper is
    /// disabled.
    async fn cancel_recurring_subscription(&self, subscriber_id: &str) -> PaymentResult;

    /// Check that the configured credentials and merchant account work.
    async fn validate_credentials(&self) -> PaymentResult;

    /// Submit the details of a payment that required a shopper redirect.
    async fn payment_details(&self, state_data: &str, payment_data: &str) -> PaymentResult;
}

/// Monetary amount in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Value in minor units (cents).
    pub value: i64,

    /// ISO 4217 currency code.
    pub currency: String,
}

impl Money {
    pub fn new(value: i64, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

/// Request for a one-time charge.
#[derive(Debug, Clone)]
pub struct OneTimeChargeRequest {
    pub payment_method: PaymentMethod,

    pub amount: Money,

    /// Caller's correlation token; echoed as the merchant reference.
    pub attempt_token: String,
}

/// Request for a recurring subscription charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringChargeRequest {
    /// Stored payment method id returned by an earlier charge.
    pub payment_token: String,

    pub attempt_token: String,

    pub amount: Money,

    /// Subscription id, sent as the merchant reference.
    pub subscription_id: String,

    /// Subscriber id, sent as the shopper reference.
    pub subscriber_id: String,
}
