//! Booking command handlers.

mod confirm_booking_webhook;

pub use confirm_booking_webhook::{
    ConfirmBookingWebhookCommand, ConfirmBookingWebhookHandler, WebhookOutcome,
};
