//! Payment methods accepted for one-time charges.
//!
//! Each variant has an explicit JSON shape matching the Adyen Checkout
//! `paymentMethod` object.

use serde_json::{json, Value};

/// Closed set of payment methods the integration sends to Adyen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Card details encrypted client-side by the Adyen web components.
    Scheme {
        encrypted_card_number: String,
        encrypted_expiry_month: String,
        encrypted_expiry_year: String,
        encrypted_security_code: Option<String>,
        holder_name: Option<String>,
    },
    /// A card previously stored with Adyen.
    StoredCard { stored_payment_method_id: String },
    /// iDEAL bank transfer.
    Ideal { issuer: Option<String> },
    ApplePay { apple_pay_token: String },
    GooglePay { google_pay_token: String },
}

impl PaymentMethod {
    /// Adyen `type` discriminator for the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            PaymentMethod::Scheme { .. } | PaymentMethod::StoredCard { .. } => "scheme",
            PaymentMethod::Ideal { .. } => "ideal",
            PaymentMethod::ApplePay { .. } => "applepay",
            PaymentMethod::GooglePay { .. } => "googlepay",
        }
    }

    /// Serializes the variant into the Adyen `paymentMethod` object.
    pub fn to_json(&self) -> Value {
        let mut body = match self {
            PaymentMethod::Scheme {
                encrypted_card_number,
                encrypted_expiry_month,
                encrypted_expiry_year,
                encrypted_security_code,
                holder_name,
            } => {
                let mut body = json!({
                    "encryptedCardNumber": encrypted_card_number,
                    "encryptedExpiryMonth": encrypted_expiry_month,
                    "encryptedExpiryYear": encrypted_expiry_year,
                });
                if let Some(code) = encrypted_security_code {
                    body["encryptedSecurityCode"] = json!(code);
                }
                if let Some(name) = holder_name {
                    body["holderName"] = json!(name);
                }
                body
            }
            PaymentMethod::StoredCard {
                stored_payment_method_id,
            } => json!({ "storedPaymentMethodId": stored_payment_method_id }),
            PaymentMethod::Ideal { issuer } => match issuer {
                Some(issuer) => json!({ "issuer": issuer }),
                None => json!({}),
            },
            PaymentMethod::ApplePay { apple_pay_token } => {
                json!({ "applePayToken": apple_pay_token })
            }
            PaymentMethod::GooglePay { google_pay_token } => {
                json!({ "googlePayToken": google_pay_token })
            }
        };

        body["type"] = json!(self.type_name());
        body
    }
}
