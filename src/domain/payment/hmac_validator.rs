//! Adyen notification HMAC validation.
//!
//! Each notification item is signed individually with HMAC-SHA256 over a
//! canonical, colon-separated string of its key fields. The key is the
//! hex-encoded HMAC key from the Adyen customer area and the signature
//! travels base64-encoded in `additionalData.hmacSignature`.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::notification::NotificationItem;

type HmacSha256 = Hmac<Sha256>;

/// Separator between canonical string fields.
const FIELD_SEPARATOR: char = ':';

/// Builds the canonical string Adyen signs for a notification item.
///
/// Field order: pspReference, originalReference, merchantAccountCode,
/// merchantReference, amount value, amount currency, eventCode, success.
/// Absent fields contribute an empty value.
pub fn canonical_string(item: &NotificationItem) -> String {
    let amount = item.amount.as_ref();
    let fields = [
        item.psp_reference.clone().unwrap_or_default(),
        item.original_reference.clone().unwrap_or_default(),
        item.merchant_account_code.clone().unwrap_or_default(),
        item.merchant_reference.clone().unwrap_or_default(),
        amount
            .and_then(|a| a.value)
            .map(|value| value.to_string())
            .unwrap_or_default(),
        amount.and_then(|a| a.currency.clone()).unwrap_or_default(),
        item.event_code.clone().unwrap_or_default(),
        item.success
            .as_ref()
            .map(|flag| flag.as_signed_value())
            .unwrap_or_default(),
    ];

    fields
        .iter()
        .map(|value| escape_value(value))
        .collect::<Vec<_>>()
        .join(&FIELD_SEPARATOR.to_string())
}

/// Escapes backslashes and separators so field boundaries stay unambiguous.
fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace(':', "\\:")
}

/// Computes the base64 signature for an item.
///
/// Returns `None` if the key is not valid hex or is empty.
pub fn sign_notification(item: &NotificationItem, hex_key: &str) -> Option<String> {
    let digest = compute_digest(item, hex_key)?;
    Some(BASE64_STANDARD.encode(digest))
}

fn compute_digest(item: &NotificationItem, hex_key: &str) -> Option<Vec<u8>> {
    let key = hex::decode(hex_key.trim()).ok()?;
    if key.is_empty() {
        return None;
    }

    let mut mac = HmacSha256::new_from_slice(&key).ok()?;
    mac.update(canonical_string(item).as_bytes());
    Some(mac.finalize().into_bytes().to_vec())
}

/// Verifies the HMAC signature carried by a notification item.
///
/// Never fails: a missing signature, a non-hex key or an undecodable
/// signature all count as invalid.
pub fn is_valid_notification(item: &NotificationItem, hex_key: &str) -> bool {
    let Some(provided) = item.hmac_signature() else {
        return false;
    };

    let Ok(provided) = BASE64_STANDARD.decode(provided.trim()) else {
        return false;
    };

    let Some(expected) = compute_digest(item, hex_key) else {
        return false;
    };

    constant_time_compare(&expected, &provided)
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::notification::{NotificationItemBuilder, SuccessFlag};
    use proptest::prelude::*;

    const TEST_KEY: &str = "44782DEF547AAA06C910C43932B1EB0C71FC68D9D0C057550C48EC2ACF6BA056";

    fn signed(item: NotificationItem) -> NotificationItem {
        let signature = sign_notification(&item, TEST_KEY).unwrap();
        let mut item = item;
        item.additional_data
            .get_or_insert_with(Default::default)
            .hmac_signature = Some(signature);
        item
    }

    // ══════════════════════════════════════════════════════════════
    // Canonical String Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn canonical_string_uses_documented_field_order() {
        let item = NotificationItemBuilder::new()
            .psp_reference("7914073381342284")
            .original_reference("ORIG1")
            .merchant_reference("TestPayment-1407325143704")
            .amount("EUR", 1130)
            .build();

        assert_eq!(
            canonical_string(&item),
            "7914073381342284:ORIG1:TestMerchant:TestPayment-1407325143704:1130:EUR:AUTHORISATION:true"
        );
    }

    #[test]
    fn canonical_string_renders_absent_fields_empty() {
        let item = NotificationItem::default();

        assert_eq!(canonical_string(&item), ":::::::");
    }

    #[test]
    fn canonical_string_escapes_separators_and_backslashes() {
        let item = NotificationItemBuilder::new()
            .merchant_reference(r"order:42\a")
            .build();

        assert!(canonical_string(&item).contains(r"order\:42\\a"));
    }

    // ══════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_signature() {
        let item = signed(NotificationItemBuilder::new().build());

        assert!(is_valid_notification(&item, TEST_KEY));
    }

    #[test]
    fn sign_matches_adyen_published_example() {
        let item = NotificationItemBuilder::new()
            .psp_reference("7914073381342284")
            .merchant_reference("TestPayment-1407325143704")
            .amount("EUR", 1130)
            .build();

        assert_eq!(
            canonical_string(&item),
            "7914073381342284::TestMerchant:TestPayment-1407325143704:1130:EUR:AUTHORISATION:true"
        );
        assert_eq!(
            sign_notification(&item, TEST_KEY).as_deref(),
            Some("coqCmt/IZ4E3CzPvMY8zTjQVL5hYJUiBRg8UU+iCWo0=")
        );

        let mut received = item;
        received
            .additional_data
            .get_or_insert_with(Default::default)
            .hmac_signature = Some("coqCmt/IZ4E3CzPvMY8zTjQVL5hYJUiBRg8UU+iCWo0=".to_string());
        assert!(is_valid_notification(&received, TEST_KEY));
    }

    #[test]
    fn verify_accepts_lowercase_hex_key() {
        let item = signed(NotificationItemBuilder::new().build());

        assert!(is_valid_notification(&item, &TEST_KEY.to_lowercase()));
    }

    #[test]
    fn verify_wrong_key_fails() {
        let item = signed(NotificationItemBuilder::new().build());

        assert!(!is_valid_notification(&item, "00112233445566778899AABBCCDDEEFF"));
    }

    #[test]
    fn verify_missing_signature_fails() {
        let item = NotificationItemBuilder::new().build();

        assert!(!is_valid_notification(&item, TEST_KEY));
    }

    #[test]
    fn verify_missing_additional_data_fails() {
        let mut item = signed(NotificationItemBuilder::new().build());
        item.additional_data = None;

        assert!(!is_valid_notification(&item, TEST_KEY));
    }

    #[test]
    fn verify_non_hex_key_fails() {
        let item = signed(NotificationItemBuilder::new().build());

        assert!(!is_valid_notification(&item, "not-a-hex-key"));
    }

    #[test]
    fn verify_empty_key_fails() {
        let item = NotificationItemBuilder::new().signature("").build();

        assert!(!is_valid_notification(&item, ""));
    }

    #[test]
    fn verify_undecodable_signature_fails() {
        let item = NotificationItemBuilder::new()
            .signature("%%% not base64 %%%")
            .build();

        assert!(!is_valid_notification(&item, TEST_KEY));
    }

    #[test]
    fn verify_tampered_amount_fails() {
        let mut item = signed(NotificationItemBuilder::new().amount("USD", 1000).build());
        item.amount.as_mut().unwrap().value = Some(1001);

        assert!(!is_valid_notification(&item, TEST_KEY));
    }

    #[test]
    fn verify_boolean_success_signs_as_text() {
        let item = signed(
            NotificationItemBuilder::new()
                .success(Some(SuccessFlag::Bool(true)))
                .build(),
        );
        let mut as_text = item.clone();
        as_text.success = Some(SuccessFlag::Text("true".to_string()));

        assert!(is_valid_notification(&item, TEST_KEY));
        assert!(is_valid_notification(&as_text, TEST_KEY));
    }

    // ══════════════════════════════════════════════════════════════
    // Constant Time Comparison Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn constant_time_compare_equal_values() {
        assert!(constant_time_compare(&[1, 2, 3], &[1, 2, 3]));
    }

    #[test]
    fn constant_time_compare_different_values() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 4]));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(&[1, 2, 3], &[1, 2, 3, 4]));
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn signed_items_always_verify(
            psp in "[A-Z0-9]{1,16}",
            reference in "[ -~]{0,24}",
            value in 0i64..10_000_000,
        ) {
            let item = signed(
                NotificationItemBuilder::new()
                    .psp_reference(psp)
                    .merchant_reference(reference)
                    .amount("USD", value)
                    .build(),
            );

            prop_assert!(is_valid_notification(&item, TEST_KEY));
        }

        #[test]
        fn changing_amount_after_signing_is_detected(
            value in 0i64..10_000_000,
            delta in prop_oneof![Just(1i64), Just(-1i64), 2i64..1000],
        ) {
            let mut item = signed(NotificationItemBuilder::new().amount("USD", value).build());
            item.amount.as_mut().unwrap().value = Some(value + delta);

            prop_assert!(!is_valid_notification(&item, TEST_KEY));
        }

        #[test]
        fn changing_psp_reference_after_signing_is_detected(
            original in "[A-Z0-9]{8}",
            replacement in "[A-Z0-9]{8}",
        ) {
            prop_assume!(original != replacement);
            let mut item = signed(NotificationItemBuilder::new().psp_reference(original).build());
            item.psp_reference = Some(replacement);

            prop_assert!(!is_valid_notification(&item, TEST_KEY));
        }
    }
}
