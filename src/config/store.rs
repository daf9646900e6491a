//! Hosted data store configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which store adapter a URL selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Hosted REST/RPC interface (`https://` or `http://`).
    HostedRest,
    /// Direct PostgreSQL connection (`postgres://` or `postgresql://`).
    Postgres,
    /// Process-local store for development (`memory://`).
    InMemory,
}

/// Data store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store endpoint; the scheme selects the adapter
    pub url: String,

    /// Service credential for the hosted REST interface
    #[serde(default)]
    pub service_key: Option<SecretString>,

    /// Per-request timeout for the REST client, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum pooled connections (PostgreSQL only)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl StoreConfig {
    /// Selects the adapter from the URL scheme.
    pub fn backend(&self) -> Result<StoreBackend, ValidationError> {
        let url = self.url.trim();
        if url.starts_with("https://") || url.starts_with("http://") {
            Ok(StoreBackend::HostedRest)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(StoreBackend::Postgres)
        } else if url.starts_with("memory://") {
            Ok(StoreBackend::InMemory)
        } else {
            Err(ValidationError::InvalidStoreUrl)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORE__URL"));
        }
        let backend = self.backend()?;
        if backend == StoreBackend::HostedRest && self.service_key.is_none() {
            return Err(ValidationError::MissingRequired("STORE__SERVICE_KEY"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_key: None,
            request_timeout_secs: default_request_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_connections() -> u32 {
    5
}
