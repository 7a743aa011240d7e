//! Integration credentials for one Adyen merchant context.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Adyen platform the integration talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    Sandbox,
    #[default]
    Live,
}

impl GatewayEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayEnvironment::Sandbox => "sandbox",
            GatewayEnvironment::Live => "live",
        }
    }
}

/// Credentials supplied once per integration context.
///
/// Read-only for their lifetime; secrets are wrapped in `SecretString` so they
/// never show up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    api_key: SecretString,
    hmac_key: Option<SecretString>,
    merchant_account: String,
    environment: GatewayEnvironment,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        merchant_account: impl Into<String>,
        environment: GatewayEnvironment,
    ) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            hmac_key: None,
            merchant_account: merchant_account.into(),
            environment,
        }
    }

    /// Set the hex-encoded HMAC key used to verify notifications.
    pub fn with_hmac_key(mut self, hmac_key: impl Into<String>) -> Self {
        self.hmac_key = Some(SecretString::new(hmac_key.into()));
        self
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// The HMAC key, if one is configured and non-blank.
    pub fn hmac_key(&self) -> Option<&str> {
        self.hmac_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn merchant_account(&self) -> &str {
        &self.merchant_account
    }

    pub fn environment(&self) -> GatewayEnvironment {
        self.environment
    }
}
