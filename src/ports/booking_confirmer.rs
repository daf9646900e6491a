//! BookingConfirmer port - the store's idempotent confirmation transition.
//!
//! Implementations invoke a single externally defined operation,
//! `confirm_booking(time_slot_id, stripe_session_id)`. The store serializes
//! concurrent confirmations and guarantees at most one transition per
//! session id; callers never read-modify-write the booking themselves.

use async_trait::async_trait;

use crate::domain::foundation::EdgeError;
use crate::domain::webhook::BookingConfirmation;

#[async_trait]
pub trait BookingConfirmer: Send + Sync {
    /// Applies the confirmation transition. Safe to repeat for the same session.
    ///
    /// # Errors
    ///
    /// `EdgeError::UpstreamQuery` if the store rejects or fails the call.
    async fn confirm_booking(&self, confirmation: &BookingConfirmation) -> Result<(), EdgeError>;
}
