//! CustomerHistory port - read-only lookups over a customer's past activity.

use async_trait::async_trait;

use crate::domain::eligibility::{NormalizedEmail, OfferMarker};
use crate::domain::foundation::EdgeError;

#[async_trait]
pub trait CustomerHistory: Send + Sync {
    /// True if any booking for `email` has payment status `paid`.
    async fn has_paid_booking(&self, email: &NormalizedEmail) -> Result<bool, EdgeError>;

    /// True if any customer token for `email` has notes containing `marker`
    /// (case-insensitive).
    async fn has_redeemed_offer(
        &self,
        email: &NormalizedEmail,
        marker: &OfferMarker,
    ) -> Result<bool, EdgeError>;
}
