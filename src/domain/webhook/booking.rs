//! Deciding what a verified webhook event asks us to do.

use super::stripe_event::{CheckoutSession, StripeEvent, StripeEventType};
use crate::domain::foundation::EdgeError;

/// Metadata key identifying what a checkout session was created for.
pub const METADATA_TYPE_KEY: &str = "type";

/// Metadata value marking a checkout session as a class booking.
pub const BOOKING_METADATA_TYPE: &str = "booking";

/// Metadata key carrying the booked time slot.
pub const TIME_SLOT_METADATA_KEY: &str = "time_slot_id";

/// Arguments for the store's idempotent `confirm_booking` transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub time_slot_id: String,
    pub stripe_session_id: String,
}

/// Outcome of inspecting a verified event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookAction {
    /// A booking checkout completed; confirm it.
    ConfirmBooking(BookingConfirmation),
    /// Verified but irrelevant; acknowledge without side effects.
    Ignore(&'static str),
}

impl WebhookAction {
    /// Maps a verified event to an action.
    ///
    /// Only `checkout.session.completed` sessions whose metadata `type` is
    /// `booking` confirm anything. Such a session must carry a time slot.
    pub fn from_event(event: &StripeEvent) -> Result<Self, EdgeError> {
        if event.parsed_type() != StripeEventType::CheckoutSessionCompleted {
            return Ok(WebhookAction::Ignore("unhandled event type"));
        }

        let session: CheckoutSession = event.deserialize_object().map_err(|e| {
            EdgeError::validation(format!("Invalid checkout session payload: {}", e))
        })?;

        if session.metadata_value(METADATA_TYPE_KEY) != Some(BOOKING_METADATA_TYPE) {
            return Ok(WebhookAction::Ignore("checkout is not a booking"));
        }

        let time_slot_id = session
            .metadata_value(TIME_SLOT_METADATA_KEY)
            .ok_or_else(|| EdgeError::validation("Missing metadata: time_slot_id"))?;

        let stripe_session_id = session.id.trim();
        if stripe_session_id.is_empty() {
            return Err(EdgeError::validation("Missing checkout session id"));
        }

        Ok(WebhookAction::ConfirmBooking(BookingConfirmation {
            time_slot_id: time_slot_id.to_string(),
            stripe_session_id: stripe_session_id.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::webhook::stripe_event::StripeEventBuilder;
    use serde_json::json;

    fn booking_session() -> serde_json::Value {
        json!({
            "id": "cs_test_abc",
            "metadata": { "type": "booking", "time_slot_id": "slot-1" }
        })
    }

    #[test]
    fn completed_booking_checkout_confirms() {
        let event = StripeEventBuilder::new().object(booking_session()).build();

        let action = WebhookAction::from_event(&event).unwrap();

        assert_eq!(
            action,
            WebhookAction::ConfirmBooking(BookingConfirmation {
                time_slot_id: "slot-1".to_string(),
                stripe_session_id: "cs_test_abc".to_string(),
            })
        );
    }

    #[test]
    fn other_event_types_are_ignored() {
        let event = StripeEventBuilder::new()
            .event_type("payment_intent.succeeded")
            .object(booking_session())
            .build();

        assert!(matches!(
            WebhookAction::from_event(&event),
            Ok(WebhookAction::Ignore(_))
        ));
    }

    #[test]
    fn expired_booking_checkout_is_ignored() {
        let event = StripeEventBuilder::new()
            .event_type("checkout.session.expired")
            .object(booking_session())
            .build();

        assert!(matches!(
            WebhookAction::from_event(&event),
            Ok(WebhookAction::Ignore(_))
        ));
    }

    #[test]
    fn non_booking_checkout_is_ignored() {
        let event = StripeEventBuilder::new()
            .object(json!({
                "id": "cs_1",
                "metadata": { "type": "gift_card", "time_slot_id": "slot-1" }
            }))
            .build();

        assert_eq!(
            WebhookAction::from_event(&event).unwrap(),
            WebhookAction::Ignore("checkout is not a booking")
        );
    }

    #[test]
    fn checkout_without_metadata_is_ignored() {
        let event = StripeEventBuilder::new()
            .object(json!({ "id": "cs_1" }))
            .build();

        assert!(matches!(
            WebhookAction::from_event(&event),
            Ok(WebhookAction::Ignore(_))
        ));
    }

    #[test]
    fn booking_without_time_slot_is_a_validation_error() {
        let event = StripeEventBuilder::new()
            .object(json!({ "id": "cs_1", "metadata": { "type": "booking" } }))
            .build();

        assert_eq!(
            WebhookAction::from_event(&event),
            Err(EdgeError::validation("Missing metadata: time_slot_id"))
        );
    }

    #[test]
    fn malformed_session_object_is_a_validation_error() {
        let event = StripeEventBuilder::new()
            .object(json!({ "metadata": "not-a-map" }))
            .build();

        assert!(matches!(
            WebhookAction::from_event(&event),
            Err(EdgeError::Validation(_))
        ));
    }
}
