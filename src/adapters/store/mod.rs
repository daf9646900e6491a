//! Store adapters - implementations of `BookingConfirmer` and `CustomerHistory`.
//!
//! The store URL scheme selects the adapter:
//! - `https://` / `http://` - `HostedRestStore` (REST/RPC with a service key)
//! - `postgres://` / `postgresql://` - `PostgresStore` (direct connection)
//! - `memory://` - `InMemoryStore` (local development)

mod hosted_rest;
mod in_memory;
mod postgres;

pub use hosted_rest::HostedRestStore;
pub use in_memory::{BookingRecord, InMemoryStore, TokenRecord};
pub use postgres::PostgresStore;

use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::foundation::EdgeError;
use crate::ports::{BookingConfirmer, CustomerHistory};

/// Both store ports, backed by the same adapter instance.
#[derive(Clone)]
pub struct StoreHandles {
    pub confirmer: Arc<dyn BookingConfirmer>,
    pub history: Arc<dyn CustomerHistory>,
}

impl StoreHandles {
    /// Shares one adapter behind both ports.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: BookingConfirmer + CustomerHistory + 'static,
    {
        Self {
            confirmer: store.clone(),
            history: store,
        }
    }
}

/// Builds the adapter selected by `config.url`.
pub async fn connect(config: &StoreConfig) -> Result<StoreHandles, EdgeError> {
    let backend = config
        .backend()
        .map_err(|e| EdgeError::configuration(e.to_string()))?;

    match backend {
        StoreBackend::HostedRest => {
            let service_key = config.service_key.clone().ok_or_else(|| {
                EdgeError::configuration("Store service key is not configured")
            })?;
            let store = HostedRestStore::new(&config.url, service_key, config.request_timeout())?;
            tracing::info!(backend = "hosted_rest", "Store adapter ready");
            Ok(StoreHandles::from_store(Arc::new(store)))
        }
        StoreBackend::Postgres => {
            let store = PostgresStore::connect(
                &config.url,
                config.max_connections,
                config.request_timeout(),
            )
            .await?;
            tracing::info!(backend = "postgres", "Store adapter ready");
            Ok(StoreHandles::from_store(Arc::new(store)))
        }
        StoreBackend::InMemory => {
            tracing::warn!(backend = "in_memory", "Using in-memory store; data is not persisted");
            Ok(StoreHandles::from_store(Arc::new(InMemoryStore::new())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_url_selects_in_memory_store() {
        let config = StoreConfig {
            url: "memory://".to_string(),
            ..Default::default()
        };

        assert!(connect(&config).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_scheme_is_configuration_error() {
        let config = StoreConfig {
            url: "ftp://store".to_string(),
            ..Default::default()
        };

        let err = connect(&config).await.err().unwrap();
        assert!(matches!(err, EdgeError::Configuration(_)));
    }

    #[tokio::test]
    async fn hosted_rest_without_key_is_configuration_error() {
        let config = StoreConfig {
            url: "https://project.example.co".to_string(),
            ..Default::default()
        };

        let err = connect(&config).await.err().unwrap();
        assert_eq!(
            err,
            EdgeError::configuration("Store service key is not configured")
        );
    }
}
