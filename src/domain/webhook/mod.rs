//! Payment webhook domain.
//!
//! - `signature` - HMAC-SHA256 verification of `stripe-signature` headers
//! - `stripe_event` - Event envelope and checkout session types
//! - `booking` - Mapping a verified event to a booking confirmation

mod booking;
mod signature;
mod stripe_event;

pub use booking::{
    BookingConfirmation, WebhookAction, BOOKING_METADATA_TYPE, METADATA_TYPE_KEY,
    TIME_SLOT_METADATA_KEY,
};
pub use signature::{
    SignatureError, SignatureHeader, StripeSignatureVerifier, DEFAULT_TOLERANCE_SECS,
};
pub use stripe_event::{CheckoutSession, StripeEvent, StripeEventData, StripeEventType};

#[cfg(test)]
pub use stripe_event::StripeEventBuilder;
