//! Introductory-offer eligibility decision.

use serde::Serialize;

/// Why a customer no longer qualifies for the introductory offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IneligibleReason {
    /// At least one paid booking exists for the customer.
    PreviousBookings,
    /// A customer token records a prior redemption.
    AlreadyUsedOffer,
}

impl IneligibleReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IneligibleReason::PreviousBookings => "previous bookings",
            IneligibleReason::AlreadyUsedOffer => "already used offer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub is_eligible: bool,
    pub reason: Option<IneligibleReason>,
}

impl Eligibility {
    pub fn eligible() -> Self {
        Self {
            is_eligible: true,
            reason: None,
        }
    }

    pub fn ineligible(reason: IneligibleReason) -> Self {
        Self {
            is_eligible: false,
            reason: Some(reason),
        }
    }

    /// Combines the two history checks.
    ///
    /// A prior paid booking is reported ahead of a prior redemption when
    /// both are present.
    pub fn from_checks(has_paid_booking: bool, has_redeemed_offer: bool) -> Self {
        if has_paid_booking {
            Self::ineligible(IneligibleReason::PreviousBookings)
        } else if has_redeemed_offer {
            Self::ineligible(IneligibleReason::AlreadyUsedOffer)
        } else {
            Self::eligible()
        }
    }
}
