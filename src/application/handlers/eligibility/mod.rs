//! Eligibility query handlers.

mod check_offer_eligibility;

pub use check_offer_eligibility::{CheckOfferEligibilityHandler, CheckOfferEligibilityQuery};
