//! Interpretation of Adyen API responses into `PaymentResult`s.
//!
//! See <https://docs.adyen.com/online-payments/payment-result-codes>.

use serde_json::Value;

use crate::domain::payment::{PaymentResult, PaymentType};
use crate::ports::{Money, TransportError, TransportResponse};

use super::routes::Operation;

/// `response` values of `/Recurring/disable` that mean the contract is gone.
pub const VALID_SUBSCRIPTION_CANCEL_STATUSES: [&str; 2] = [
    "[detail-successfully-disabled]",
    "[all-details-successfully-disabled]",
];

/// Result codes for which the payment went through or will settle later.
const ACCEPTED_RESULT_CODES: [&str; 3] = ["Authorised", "Pending", "Received"];

/// Result codes that hand control to the shopper via an `action`.
const ACTION_RESULT_CODES: [&str; 4] = [
    "RedirectShopper",
    "IdentifyShopper",
    "ChallengeShopper",
    "PresentToShopper",
];

/// Additional-data key holding the stored payment method reference.
const RECURRING_DETAIL_REFERENCE: &str = "recurring.recurringDetailReference";

/// Context of the request a response belongs to.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub operation: Operation,
    pub payment_type: PaymentType,
    /// Amount sent with the request, used when the response omits it.
    pub amount: Option<&'a Money>,
}

/// Turns a transport outcome into a payment result.
pub fn interpret(
    context: RequestContext<'_>,
    outcome: Result<TransportResponse, TransportError>,
) -> PaymentResult {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            return PaymentResult::error(context.payment_type, err.to_string())
                .with_code(err.code())
                .build();
        }
    };

    if !response.is_success() {
        return api_error(context.payment_type, &response);
    }

    match context.operation {
        Operation::ChargeOnetime
        | Operation::ChargeRecurringSubscription
        | Operation::PaymentDetails => payment_response(context, &response.body),
        Operation::CapturePayment | Operation::RefundPayment => {
            modification_response(context, &response.body)
        }
        Operation::CancelRecurringSubscription => disable_response(context, &response.body),
        Operation::ValidateCredentials => PaymentResult::success(context.payment_type)
            .provider_status("credentials_valid")
            .build(),
    }
}

/// Adyen error body: `{status, errorCode, message, errorType}`.
fn api_error(payment_type: PaymentType, response: &TransportResponse) -> PaymentResult {
    let message = str_field(&response.body, "message")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Adyen API error (HTTP {})", response.status));
    let code = str_field(&response.body, "errorCode")
        .map(str::to_string)
        .unwrap_or_else(|| response.status.to_string());

    PaymentResult::error(payment_type, message)
        .with_code(code)
        .build()
}

/// `/payments` and `/payments/details` responses.
fn payment_response(context: RequestContext<'_>, body: &Value) -> PaymentResult {
    let Some(result_code) = str_field(body, "resultCode") else {
        return PaymentResult::error(context.payment_type, "Missing resultCode in Adyen response")
            .build();
    };

    if ACCEPTED_RESULT_CODES.contains(&result_code) || ACTION_RESULT_CODES.contains(&result_code)
    {
        let mut success = PaymentResult::success(context.payment_type).provider_status(result_code);

        if let Some(psp) = str_field(body, "pspReference") {
            success = success.external_payment_id(psp);
        }
        if let Some((cents, currency)) = response_amount(body).or_else(|| {
            context
                .amount
                .map(|money| (money.value, money.currency.clone()))
        }) {
            success = success.amount(cents, currency);
        }
        if let Some(token) = body
            .get("additionalData")
            .and_then(|data| str_field(data, RECURRING_DETAIL_REFERENCE))
        {
            success = success.payment_token(token);
        }
        if let Some(action) = body.get("action").filter(|action| !action.is_null()) {
            success = success.action(action.clone());
        }

        return success.build();
    }

    let message = str_field(body, "refusalReason").unwrap_or(result_code);
    let code = str_field(body, "refusalReasonCode").unwrap_or(result_code);
    PaymentResult::error(context.payment_type, message)
        .with_code(code)
        .build()
}

/// Capture and refund responses: `{pspReference, paymentPspReference, status: "received"}`.
fn modification_response(context: RequestContext<'_>, body: &Value) -> PaymentResult {
    match str_field(body, "status") {
        Some("received") => {
            let mut success = PaymentResult::success(context.payment_type).provider_status("received");
            if let Some(psp) = str_field(body, "pspReference") {
                success = success.external_payment_id(psp);
            }
            if let Some((cents, currency)) = response_amount(body).or_else(|| {
                context
                    .amount
                    .map(|money| (money.value, money.currency.clone()))
            }) {
                success = success.amount(cents, currency);
            }
            success.build()
        }
        other => PaymentResult::error(
            context.payment_type,
            format!(
                "Unexpected {} status: {}",
                context.operation.as_str(),
                other.unwrap_or("missing")
            ),
        )
        .build(),
    }
}

/// `/Recurring/disable` response: `{response: "[detail-successfully-disabled]"}`.
fn disable_response(context: RequestContext<'_>, body: &Value) -> PaymentResult {
    let status = str_field(body, "response").unwrap_or_default();

    if VALID_SUBSCRIPTION_CANCEL_STATUSES.contains(&status) {
        PaymentResult::success(context.payment_type)
            .provider_status(status)
            .build()
    } else {
        PaymentResult::error(
            context.payment_type,
            format!("Subscription could not be disabled: {}", status),
        )
        .build()
    }
}

fn response_amount(body: &Value) -> Option<(i64, String)> {
    let amount = body.get("amount")?;
    Some((
        amount.get("value")?.as_i64()?,
        str_field(amount, "currency")?.to_string(),
    ))
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}
