//! Introductory-offer eligibility domain.
//!
//! - `email` - Normalized customer identity
//! - `offer` - Redemption marker matched against token notes
//! - `decision` - Combining the two history checks

mod decision;
mod email;
mod offer;

pub use decision::{Eligibility, IneligibleReason};
pub use email::NormalizedEmail;
pub use offer::{OfferMarker, DEFAULT_OFFER_MARKER};
