//! Adyen integration configuration

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::adapters::adyen::{AdyenClient, HttpTransport};
use crate::domain::payment::{Credentials, GatewayEnvironment};
use crate::ports::TransportError;

use super::error::ValidationError;

/// Adyen configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdyenConfig {
    /// Checkout/PAL API key
    pub api_key: SecretString,

    /// Hex-encoded HMAC key for notification signatures.
    /// Without it every notification batch is rejected.
    #[serde(default)]
    pub hmac_key: Option<SecretString>,

    /// Merchant account sent with every request
    pub merchant_account: String,

    /// `sandbox` or `live`
    #[serde(default)]
    pub environment: GatewayEnvironment,

    /// Where Adyen sends shoppers back after a redirect payment
    #[serde(default = "default_return_url")]
    pub return_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl AdyenConfig {
    /// Build the integration credentials.
    pub fn credentials(&self) -> Credentials {
        let credentials = Credentials::new(
            self.api_key.expose_secret().clone(),
            self.merchant_account.clone(),
            self.environment,
        );

        match &self.hmac_key {
            Some(key) => credentials.with_hmac_key(key.expose_secret().clone()),
            None => credentials,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Build the outbound Adyen client over HTTP, using the configured
    /// timeout and return URL.
    pub fn gateway_client(&self) -> Result<AdyenClient, TransportError> {
        let transport = HttpTransport::new(self.api_key.clone(), self.request_timeout())?;

        Ok(AdyenClient::new(self.credentials(), Arc::new(transport))
            .with_return_url(self.return_url.clone()))
    }

    /// Check if talking to the Adyen test platform
    pub fn is_sandbox(&self) -> bool {
        self.environment == GatewayEnvironment::Sandbox
    }

    /// Validate Adyen configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("ADYEN_API_KEY"));
        }
        if self.merchant_account.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ADYEN_MERCHANT_ACCOUNT"));
        }

        if let Some(key) = &self.hmac_key {
            let key = key.expose_secret();
            if !key.is_empty() && hex::decode(key).is_err() {
                return Err(ValidationError::InvalidHmacKey);
            }
        }

        if !(self.return_url.starts_with("https://") || self.return_url.starts_with("http://")) {
            return Err(ValidationError::InvalidReturnUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

fn default_return_url() -> String {
    crate::adapters::adyen::DEFAULT_RETURN_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    const HMAC_KEY: &str = "44782DEF547AAA06C910C43932B1EB0C71FC68D9D0C057550C48EC2ACF6BA056";

    fn valid_config() -> AdyenConfig {
        AdyenConfig {
            api_key: SecretString::new("AQE1hmfxKo".to_string()),
            hmac_key: Some(SecretString::new(HMAC_KEY.to_string())),
            merchant_account: "TestMerchant".to_string(),
            environment: GatewayEnvironment::Sandbox,
            return_url: default_return_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = AdyenConfig {
            api_key: SecretString::new("  ".to_string()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("ADYEN_API_KEY"))
        ));
    }

    #[test]
    fn test_validation_missing_merchant_account() {
        let config = AdyenConfig {
            merchant_account: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_non_hex_hmac_key() {
        let config = AdyenConfig {
            hmac_key: Some(SecretString::new("not-hex".to_string())),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHmacKey)
        ));
    }

    #[test]
    fn test_missing_hmac_key_is_allowed() {
        let config = AdyenConfig {
            hmac_key: None,
            ..valid_config()
        };
        assert!(config.validate().is_ok());
        assert!(config.credentials().hmac_key().is_none());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = AdyenConfig {
            request_timeout_secs: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());

        let config = AdyenConfig {
            request_timeout_secs: 500,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_return_url() {
        let config = AdyenConfig {
            return_url: "ftp://example.com".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidReturnUrl)
        ));
    }

    #[test]
    fn test_credentials_carry_config_values() {
        let credentials = valid_config().credentials();

        assert_eq!(credentials.merchant_account(), "TestMerchant");
        assert_eq!(credentials.environment(), GatewayEnvironment::Sandbox);
        assert_eq!(credentials.hmac_key(), Some(HMAC_KEY));
        assert_eq!(credentials.api_key().expose_secret(), "AQE1hmfxKo");
    }

    #[test]
    fn test_gateway_client_uses_config() {
        let config = AdyenConfig {
            return_url: "https://billing.example.com/return".to_string(),
            ..valid_config()
        };

        let client = config.gateway_client().unwrap();

        assert_eq!(
            client.endpoints(),
            &crate::adapters::adyen::Endpoints::for_environment(GatewayEnvironment::Sandbox)
        );
        assert_eq!(client.return_url(), "https://billing.example.com/return");
    }

    #[test]
    fn test_is_sandbox() {
        assert!(valid_config().is_sandbox());
        let config = AdyenConfig {
            environment: GatewayEnvironment::Live,
            ..valid_config()
        };
        assert!(!config.is_sandbox());
    }
}
