//! Domain layer - pure types and rules, no I/O.
//!
//! - `foundation` - Error taxonomy shared by every handler
//! - `webhook` - Signature verification and booking-confirmation mapping
//! - `eligibility` - Introductory-offer eligibility rules

pub mod eligibility;
pub mod foundation;
pub mod webhook;
