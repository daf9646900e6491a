//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The webhook handler is a command (it triggers a store transition); the
//! eligibility handler is a read-only query.

pub mod handlers;

pub use handlers::{
    CheckOfferEligibilityHandler, CheckOfferEligibilityQuery, ConfirmBookingWebhookCommand,
    ConfirmBookingWebhookHandler, WebhookOutcome,
};
