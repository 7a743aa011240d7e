//! Adyen notification webhook types.
//!
//! Defines the structures for parsing Adyen standard notification batches.
//! Every field the integration consumes is a named optional member, so a
//! missing level in the payload becomes `None` instead of a parse failure.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Inbound notification batch (`{"live": ..., "notificationItems": [...]}`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotificationBatch {
    /// Whether Adyen sent this batch from the live platform ("true"/"false").
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,

    /// Items carried by the batch. Absent and empty are both rejected upstream.
    #[serde(
        rename = "notificationItems",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub notification_items: Option<Vec<NotificationItemEnvelope>>,
}

impl NotificationBatch {
    /// Returns true if Adyen marked the batch as coming from the live platform.
    pub fn is_live(&self) -> bool {
        self.live.as_deref() == Some("true")
    }

    /// Iterates the wrapped notification items, in wire order.
    pub fn items(&self) -> impl Iterator<Item = Option<&NotificationItem>> {
        self.notification_items
            .iter()
            .flatten()
            .map(|envelope| envelope.item.as_ref())
    }
}

/// Wrapper object Adyen puts around each item.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotificationItemEnvelope {
    #[serde(
        rename = "NotificationRequestItem",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub item: Option<NotificationItem>,
}

/// One event record within a notification batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    /// Event code (e.g., "AUTHORISATION").
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub event_code: Option<String>,

    /// Outcome flag as sent on the wire.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub success: Option<SuccessFlag>,

    /// Adyen's reference for the payment.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub psp_reference: Option<String>,

    /// Reference of the original payment for modification events.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub original_reference: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub merchant_account_code: Option<String>,

    /// Merchant reference supplied with the payment request.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub merchant_reference: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<AdditionalData>,

    /// Sub-allocations of the amount (e.g., the gateway fee).
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub splits: Option<Vec<Split>>,

    /// Refusal or error reason when `success` is not "true".
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl NotificationItem {
    /// The HMAC signature Adyen attached to this item, if any.
    pub fn hmac_signature(&self) -> Option<&str> {
        self.additional_data
            .as_ref()
            .and_then(|data| data.hmac_signature.as_deref())
    }
}

/// The `success` field of a notification item.
///
/// Adyen documents it as the string "true" or "false". A JSON boolean is
/// accepted by the parser but never treated as success.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SuccessFlag {
    Text(String),
    Bool(bool),
}

impl SuccessFlag {
    /// Returns true only for the literal string "true".
    pub fn is_literal_true(&self) -> bool {
        matches!(self, SuccessFlag::Text(text) if text == "true")
    }

    /// Value as it takes part in the signed canonical string.
    pub fn as_signed_value(&self) -> String {
        match self {
            SuccessFlag::Text(text) => text.clone(),
            SuccessFlag::Bool(flag) => flag.to_string(),
        }
    }
}

/// Monetary amount in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Amount {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Value in minor units (cents).
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// The `additionalData` map of a notification item.
///
/// Keys the integration reads are typed; everything else is kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AdditionalData {
    #[serde(
        rename = "hmacSignature",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub hmac_signature: Option<String>,

    /// Stored payment method reference, used as the external subscription id.
    #[serde(
        rename = "recurring.recurringDetailReference",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurring_detail_reference: Option<String>,

    #[serde(
        rename = "shopperEmail",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub shopper_email: Option<String>,

    #[serde(flatten)]
    pub other: HashMap<String, serde_json::Value>,
}

/// A split of the notification amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Split {
    /// Split type (e.g., "PaymentFee", "Commission").
    #[serde(rename = "type", default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub split_type: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
}

/// Decodes a field, turning a value of the wrong JSON type into `None`.
///
/// A well-formed body with odd field types still reaches the signature check
/// (and fails it) instead of being rejected as unparseable.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Builder for creating test NotificationItem instances.
#[cfg(test)]
pub struct NotificationItemBuilder {
    item: NotificationItem,
}

#[cfg(test)]
impl Default for NotificationItemBuilder {
    fn default() -> Self {
        Self {
            item: NotificationItem {
                event_code: Some("AUTHORISATION".to_string()),
                success: Some(SuccessFlag::Text("true".to_string())),
                psp_reference: Some("PSP1".to_string()),
                merchant_account_code: Some("TestMerchant".to_string()),
                merchant_reference: Some("attempt_123".to_string()),
                amount: Some(Amount {
                    currency: Some("USD".to_string()),
                    value: Some(1000),
                }),
                additional_data: Some(AdditionalData::default()),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
impl NotificationItemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_code(mut self, code: impl Into<String>) -> Self {
        self.item.event_code = Some(code.into());
        self
    }

    pub fn success(mut self, flag: Option<SuccessFlag>) -> Self {
        self.item.success = flag;
        self
    }

    pub fn psp_reference(mut self, psp: impl Into<String>) -> Self {
        self.item.psp_reference = Some(psp.into());
        self
    }

    pub fn original_reference(mut self, reference: impl Into<String>) -> Self {
        self.item.original_reference = Some(reference.into());
        self
    }

    pub fn merchant_reference(mut self, reference: impl Into<String>) -> Self {
        self.item.merchant_reference = Some(reference.into());
        self
    }

    pub fn amount(mut self, currency: &str, value: i64) -> Self {
        self.item.amount = Some(Amount {
            currency: Some(currency.to_string()),
            value: Some(value),
        });
        self
    }

    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.item
            .additional_data
            .get_or_insert_with(AdditionalData::default)
            .hmac_signature = Some(signature.into());
        self
    }

    pub fn shopper_email(mut self, email: impl Into<String>) -> Self {
        self.item
            .additional_data
            .get_or_insert_with(AdditionalData::default)
            .shopper_email = Some(email.into());
        self
    }

    pub fn recurring_detail_reference(mut self, reference: impl Into<String>) -> Self {
        self.item
            .additional_data
            .get_or_insert_with(AdditionalData::default)
            .recurring_detail_reference = Some(reference.into());
        self
    }

    pub fn split(mut self, split_type: &str, currency: &str, value: i64) -> Self {
        self.item.splits.get_or_insert_with(Vec::new).push(Split {
            split_type: Some(split_type.to_string()),
            amount: Some(Amount {
                currency: Some(currency.to_string()),
                value: Some(value),
            }),
        });
        self
    }

    pub fn build(self) -> NotificationItem {
        self.item
    }
}
