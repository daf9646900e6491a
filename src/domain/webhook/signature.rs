//! Stripe webhook signature verification.
//!
//! The signature is HMAC-SHA256 over `"<timestamp>." ++ raw_body`, keyed with
//! the endpoint's signing secret. The MAC is computed over the exact bytes
//! received; any re-serialization of the body would break verification.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::domain::foundation::EdgeError;

type HmacSha256 = Hmac<Sha256>;

/// Default maximum age of a signed event (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Maximum allowed clock skew for timestamps in the future (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Reasons a signature header fails verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Missing stripe-signature header")]
    MissingHeader,

    #[error("Malformed stripe-signature header: {0}")]
    Malformed(&'static str),

    #[error("Webhook timestamp too old ({age_secs} seconds)")]
    TimestampTooOld { age_secs: i64 },

    #[error("Webhook timestamp is in the future")]
    TimestampInFuture,

    #[error("No signatures found matching the expected signature for payload")]
    Mismatch,
}

impl From<SignatureError> for EdgeError {
    fn from(err: SignatureError) -> Self {
        EdgeError::authentication(format!("Webhook signature verification failed: {}", err))
    }
}

/// Parsed components of a `stripe-signature` header.
///
/// Format: `t=<timestamp>,v1=<hex>[,v1=<hex>...][,v0=<hex>]`. Stripe sends
/// several `v1` entries while a secret is being rolled; any one may match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(SignatureError::MissingHeader);
        }

        let mut timestamp: Option<i64> = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or(SignatureError::Malformed("expected key=value pairs"))?;

            match key.trim() {
                "t" => {
                    timestamp = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| SignatureError::Malformed("invalid timestamp"))?,
                    );
                }
                "v1" => {
                    let signature = hex::decode(value.trim())
                        .map_err(|_| SignatureError::Malformed("v1 signature is not hex"))?;
                    v1_signatures.push(signature);
                }
                // v0 and unknown schemes are ignored for forward compatibility
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::Malformed("missing timestamp"))?;
        if v1_signatures.is_empty() {
            return Err(SignatureError::Malformed("missing v1 signature"));
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifies Stripe webhook signatures against a signing secret.
#[derive(Clone)]
pub struct StripeSignatureVerifier {
    secret: SecretString,
    tolerance_secs: i64,
}

impl StripeSignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Overrides how old a signed event may be before it is rejected.
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies `payload` against `signature_header` using the current clock.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), SignatureError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// Verifies `payload` as of the unix time `now`.
    ///
    /// Steps: parse the header, check the timestamp window, then compare the
    /// expected MAC against every `v1` entry in constant time.
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), SignatureError> {
        let header = SignatureHeader::parse(signature_header)?;

        let age = now
            .checked_sub(header.timestamp)
            .ok_or(SignatureError::Malformed("invalid timestamp"))?;
        if age > self.tolerance_secs {
            return Err(SignatureError::TimestampTooOld { age_secs: age });
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(SignatureError::TimestampInFuture);
        }

        let expected = self.compute_signature(header.timestamp, payload);
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));

        if matched {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }

    /// Produces a `stripe-signature` header value for `payload` at `timestamp`.
    ///
    /// Used to replay captured events against a local instance.
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> String {
        format!(
            "t={},v1={}",
            timestamp,
            hex::encode(self.compute_signature(timestamp, payload))
        )
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
