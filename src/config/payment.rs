//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::webhook::{StripeSignatureVerifier, DEFAULT_TOLERANCE_SECS};

/// Payment configuration (Stripe)
///
/// Both secrets are optional at load time. A missing webhook secret is
/// reported per request by the webhook handler.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    #[serde(default)]
    pub stripe_secret_key: Option<SecretString>,

    /// Stripe webhook signing secret
    #[serde(default)]
    pub stripe_webhook_secret: Option<SecretString>,

    /// Maximum age of a signed webhook, in seconds
    #[serde(default = "default_signature_tolerance")]
    pub signature_tolerance_secs: i64,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.secret_key()
            .map(|k| k.starts_with("sk_test_"))
            .unwrap_or(false)
    }

    /// Builds the webhook verifier, or `None` if no signing secret is set.
    pub fn webhook_verifier(&self) -> Option<StripeSignatureVerifier> {
        self.webhook_secret().map(|secret| {
            StripeSignatureVerifier::new(SecretString::new(secret.to_string()))
                .with_tolerance(self.signature_tolerance_secs)
        })
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = self.secret_key() {
            if !key.starts_with("sk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
        }
        if let Some(secret) = self.webhook_secret() {
            if !secret.starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }
        if self.signature_tolerance_secs <= 0 {
            return Err(ValidationError::InvalidSignatureTolerance);
        }
        Ok(())
    }

    fn secret_key(&self) -> Option<&str> {
        non_empty(self.stripe_secret_key.as_ref())
    }

    fn webhook_secret(&self) -> Option<&str> {
        non_empty(self.stripe_webhook_secret.as_ref())
    }
}

fn non_empty(secret: Option<&SecretString>) -> Option<&str> {
    secret
        .map(|s| s.expose_secret().as_str())
        .filter(|s| !s.trim().is_empty())
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_webhook_secret: None,
            signature_tolerance_secs: default_signature_tolerance(),
        }
    }
}

fn default_signature_tolerance() -> i64 {
    DEFAULT_TOLERANCE_SECS
}
