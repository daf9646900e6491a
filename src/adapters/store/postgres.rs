//! PostgreSQL implementation of the store ports.
//!
//! Used when the store URL is a direct database connection. Booking
//! confirmation goes through the same `confirm_booking` stored procedure
//! the hosted RPC endpoint exposes, so the transactional capacity check
//! stays in the database.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::eligibility::{NormalizedEmail, OfferMarker};
use crate::domain::foundation::EdgeError;
use crate::domain::webhook::BookingConfirmation;
use crate::ports::{BookingConfirmer, CustomerHistory};

/// PostgreSQL store adapter.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgresStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `url`.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, EdgeError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| EdgeError::configuration(format!("Failed to connect to store: {}", e)))?;

        Ok(Self::new(pool))
    }
}

fn query_failed(e: sqlx::Error) -> EdgeError {
    EdgeError::upstream_query(format!("Store query failed: {}", e))
}

#[async_trait]
impl BookingConfirmer for PostgresStore {
    async fn confirm_booking(&self, confirmation: &BookingConfirmation) -> Result<(), EdgeError> {
        sqlx::query("SELECT confirm_booking($1, $2)")
            .bind(&confirmation.time_slot_id)
            .bind(&confirmation.stripe_session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "confirm_booking failed");
                EdgeError::upstream_query(format!("Booking confirmation failed: {}", e))
            })?;

        Ok(())
    }
}

#[async_trait]
impl CustomerHistory for PostgresStore {
    async fn has_paid_booking(&self, email: &NormalizedEmail) -> Result<bool, EdgeError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE customer_email = $1 AND payment_status = 'paid'
            )
            "#,
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(exists)
    }

    async fn has_redeemed_offer(
        &self,
        email: &NormalizedEmail,
        marker: &OfferMarker,
    ) -> Result<bool, EdgeError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM customer_tokens
                WHERE customer_email = $1 AND notes ILIKE $2
            )
            "#,
        )
        .bind(email.as_str())
        .bind(marker.like_pattern())
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(exists)
    }
}
