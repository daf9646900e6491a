//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod booking;
pub mod eligibility;

pub use booking::{ConfirmBookingWebhookCommand, ConfirmBookingWebhookHandler, WebhookOutcome};
pub use eligibility::{CheckOfferEligibilityHandler, CheckOfferEligibilityQuery};
