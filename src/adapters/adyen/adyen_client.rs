//! Adyen payment gateway client.
//!
//! Implements the `PaymentGateway` port on top of a `GatewayTransport`.
//! Each operation builds a fixed-shape JSON body, resolves its URL through
//! the route table and interprets the answer into a `PaymentResult`.
//!
//! # Configuration
//!
//! ```ignore
//! let credentials = Credentials::new(api_key, merchant_account, GatewayEnvironment::Sandbox);
//! let transport = HttpTransport::new(credentials.api_key().clone(), timeout)?;
//! let client = AdyenClient::new(credentials, Arc::new(transport))
//!     .with_return_url("https://billing.example.com/payment-return");
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::payment::{Credentials, PaymentResult, PaymentType};
use crate::ports::{
    GatewayTransport, Money, OneTimeChargeRequest, PaymentGateway, RecurringChargeRequest,
};

use super::responses::{interpret, RequestContext};
use super::routes::{Endpoints, Operation};

/// Default URL Adyen sends the shopper back to after a redirect.
pub const DEFAULT_RETURN_URL: &str =
    "http://localhost:7000/api/access/v1/handle-payment-gateway-response";

/// Adyen payment gateway client.
pub struct AdyenClient {
    credentials: Credentials,
    endpoints: Endpoints,
    transport: Arc<dyn GatewayTransport>,
    return_url: String,
}

impl AdyenClient {
    /// Create a client using the standard endpoints of the credentials' environment.
    pub fn new(credentials: Credentials, transport: Arc<dyn GatewayTransport>) -> Self {
        let endpoints = Endpoints::for_environment(credentials.environment());
        Self {
            credentials,
            endpoints,
            transport,
            return_url: DEFAULT_RETURN_URL.to_string(),
        }
    }

    /// Override the API endpoints (for testing).
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the shopper return URL for redirect payment methods.
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = url.into();
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    fn merchant_account(&self) -> &str {
        self.credentials.merchant_account()
    }

    /// Posts a body for an operation and interprets the answer.
    async fn execute(
        &self,
        operation: Operation,
        payment_id: Option<&str>,
        payment_type: PaymentType,
        amount: Option<&Money>,
        body: Value,
    ) -> PaymentResult {
        let url = self.endpoints.url_for(operation, payment_id);

        let outcome = self.transport.post_json(&url, &body).await;

        if let Err(err) = &outcome {
            tracing::error!(
                operation = operation.as_str(),
                error = %err,
                "Adyen request failed"
            );
        }

        let result = interpret(
            RequestContext {
                operation,
                payment_type,
                amount,
            },
            outcome,
        );

        match &result {
            PaymentResult::Success(success) => tracing::info!(
                operation = operation.as_str(),
                psp_reference = ?success.external_payment_id,
                status = ?success.provider_status,
                "Adyen operation succeeded"
            ),
            PaymentResult::Error(failure) => tracing::warn!(
                operation = operation.as_str(),
                code = ?failure.code,
                message = %failure.message,
                "Adyen operation returned an error"
            ),
        }

        result
    }

    /// Return URL carrying the percent-encoded attempt token.
    fn return_url_for(&self, attempt_token: &str) -> String {
        let separator = if self.return_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}attempt_token={}",
            self.return_url,
            separator,
            urlencoding::encode(attempt_token)
        )
    }

    fn amount_json(amount: &Money) -> Value {
        json!({ "currency": amount.currency, "value": amount.value })
    }
}

#[async_trait]
impl PaymentGateway for AdyenClient {
    async fn capture_payment(&self, payment_id: &str, amount: &Money) -> PaymentResult {
        let body = json!({
            "amount": Self::amount_json(amount),
            "merchantAccount": self.merchant_account(),
        });

        self.execute(
            Operation::CapturePayment,
            Some(payment_id),
            PaymentType::OneTime,
            Some(amount),
            body,
        )
        .await
    }

    async fn refund_payment(&self, payment_id: &str, amount: &Money) -> PaymentResult {
        let body = json!({
            "amount": Self::amount_json(amount),
            "merchantAccount": self.merchant_account(),
        });

        self.execute(
            Operation::RefundPayment,
            Some(payment_id),
            PaymentType::OneTime,
            Some(amount),
            body,
        )
        .await
    }

    // Metadata limits: 20 keys, 20 characters per key, 80 per value.
    async fn charge_onetime(&self, request: OneTimeChargeRequest) -> PaymentResult {
        let body = json!({
            "amount": Self::amount_json(&request.amount),
            "metadata": { "attemptToken": request.attempt_token },
            "reference": request.attempt_token,
            "paymentMethod": request.payment_method.to_json(),
            "merchantAccount": self.merchant_account(),
            "returnUrl": self.return_url_for(&request.attempt_token),
        });

        self.execute(
            Operation::ChargeOnetime,
            None,
            PaymentType::OneTime,
            Some(&request.amount),
            body,
        )
        .await
    }

    async fn charge_recurring_subscription(
        &self,
        request: RecurringChargeRequest,
    ) -> PaymentResult {
        let body = json!({
            "amount": Self::amount_json(&request.amount),
            "paymentMethod": {
                "type": "scheme",
                "storedPaymentMethodId": request.payment_token,
            },
            "reference": request.subscription_id,
            "shopperInteraction": "ContAuth",
            "recurringProcessingModel": "Subscription",
            "shopperReference": request.subscriber_id,
            "merchantAccount": self.merchant_account(),
            "metadata": { "attemptToken": request.attempt_token },
        });

        let result = self
            .execute(
                Operation::ChargeRecurringSubscription,
                None,
                PaymentType::Recurring,
                Some(&request.amount),
                body,
            )
            .await;

        match result {
            PaymentResult::Success(success) => success
                .external_subscription_id(request.subscription_id)
                .payment_token(request.payment_token)
                .build(),
            error => error,
        }
    }

    async fn cancel_recurring_subscription(&self, subscriber_id: &str) -> PaymentResult {
        let body = json!({
            "contract": "RECURRING",
            "shopperReference": subscriber_id,
            "merchantAccount": self.merchant_account(),
        });

        self.execute(
            Operation::CancelRecurringSubscription,
            None,
            PaymentType::Recurring,
            None,
            body,
        )
        .await
    }

    // Uses paymentMethods: a 200 proves the key and merchant account work.
    async fn validate_credentials(&self) -> PaymentResult {
        let body = json!({ "merchantAccount": self.merchant_account() });

        self.execute(
            Operation::ValidateCredentials,
            None,
            PaymentType::OneTime,
            None,
            body,
        )
        .await
    }

    async fn payment_details(&self, state_data: &str, payment_data: &str) -> PaymentResult {
        let body = json!({
            "details": { "threeDSResult": state_data },
            "paymentData": payment_data,
        });

        self.execute(
            Operation::PaymentDetails,
            None,
            PaymentType::OneTime,
            None,
            body,
        )
        .await
    }
}
