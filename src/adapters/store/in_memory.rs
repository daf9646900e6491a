//! In-memory store implementation.
//!
//! Useful for:
//! - Unit and integration tests
//! - Local development (`STUDIO_EDGE__STORE__URL=memory://`)
//!
//! Does not persist data across restarts.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::eligibility::{NormalizedEmail, OfferMarker};
use crate::domain::foundation::EdgeError;
use crate::domain::webhook::BookingConfirmation;
use crate::ports::{BookingConfirmer, CustomerHistory};

/// A booking row as far as eligibility is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub customer_email: String,
    pub payment_status: String,
}

/// A customer token row with its free-text notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub customer_email: String,
    pub notes: String,
}

#[derive(Default)]
struct State {
    bookings: Vec<BookingRecord>,
    tokens: Vec<TokenRecord>,
    confirm_calls: Vec<BookingConfirmation>,
    confirmed: Vec<BookingConfirmation>,
    failure: Option<String>,
}

/// In-memory implementation of `BookingConfirmer` and `CustomerHistory`.
///
/// Confirmation is idempotent per Stripe session id: a redelivered webhook
/// is recorded as a call but does not confirm twice.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a booking row.
    pub fn with_booking(self, customer_email: &str, payment_status: &str) -> Self {
        self.lock().bookings.push(BookingRecord {
            customer_email: customer_email.to_string(),
            payment_status: payment_status.to_string(),
        });
        self
    }

    /// Seeds a customer token row.
    pub fn with_token(self, customer_email: &str, notes: &str) -> Self {
        self.lock().tokens.push(TokenRecord {
            customer_email: customer_email.to_string(),
            notes: notes.to_string(),
        });
        self
    }

    /// Makes every subsequent store operation fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    /// Every `confirm_booking` call, including redeliveries.
    pub fn confirm_calls(&self) -> Vec<BookingConfirmation> {
        self.lock().confirm_calls.clone()
    }

    /// Distinct confirmed bookings.
    pub fn confirmed(&self) -> Vec<BookingConfirmation> {
        self.lock().confirmed.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(state: &State) -> Result<(), EdgeError> {
        match &state.failure {
            Some(message) => Err(EdgeError::upstream_query(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookingConfirmer for InMemoryStore {
    async fn confirm_booking(&self, confirmation: &BookingConfirmation) -> Result<(), EdgeError> {
        let mut state = self.lock();
        state.confirm_calls.push(confirmation.clone());
        Self::check_failure(&state)?;

        let already_confirmed = state
            .confirmed
            .iter()
            .any(|c| c.stripe_session_id == confirmation.stripe_session_id);
        if !already_confirmed {
            state.confirmed.push(confirmation.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerHistory for InMemoryStore {
    async fn has_paid_booking(&self, email: &NormalizedEmail) -> Result<bool, EdgeError> {
        let state = self.lock();
        Self::check_failure(&state)?;

        Ok(state
            .bookings
            .iter()
            .any(|b| b.customer_email == email.as_str() && b.payment_status == "paid"))
    }

    async fn has_redeemed_offer(
        &self,
        email: &NormalizedEmail,
        marker: &OfferMarker,
    ) -> Result<bool, EdgeError> {
        let state = self.lock();
        Self::check_failure(&state)?;

        Ok(state
            .tokens
            .iter()
            .any(|t| t.customer_email == email.as_str() && marker.matches(&t.notes)))
    }
}
