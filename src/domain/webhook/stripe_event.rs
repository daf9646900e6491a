//! Stripe webhook event types.
//!
//! Only the fields this service reads are captured; the rest of Stripe's
//! event schema is ignored during deserialization.

use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Event identifier (`evt_...`).
    pub id: String,

    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,

    pub data: StripeEventData,
}

/// Container for the object that triggered the event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Parses the event type into a known variant.
    pub fn parsed_type(&self) -> StripeEventType {
        self.event_type
            .parse()
            .unwrap_or(StripeEventType::Unknown)
    }

    /// Deserializes the data object as `T`.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Event types this service distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    CheckoutSessionCompleted,
    Unknown,
}

impl FromStr for StripeEventType {
    type Err = Infallible;

    /// Any type other than `checkout.session.completed` is `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            _ => Self::Unknown,
        })
    }
}

/// Checkout session object carried by `checkout.session.*` events.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutSession {
    /// Checkout session identifier (`cs_...`).
    pub id: String,

    /// Free-form key/value pairs attached when the session was created.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// Returns a trimmed, non-empty metadata value.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Builder for test events.
#[cfg(test)]
pub struct StripeEventBuilder {
    id: String,
    event_type: String,
    object: serde_json::Value,
}

#[cfg(test)]
impl Default for StripeEventBuilder {
    fn default() -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: "checkout.session.completed".to_string(),
            object: serde_json::json!({}),
        }
    }
}

#[cfg(test)]
impl StripeEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn build(self) -> StripeEvent {
        StripeEvent {
            id: self.id,
            event_type: self.event_type,
            data: StripeEventData {
                object: self.object,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_minimal_event() {
        let json = r#"{
            "id": "evt_1234567890",
            "type": "checkout.session.completed",
            "data": { "object": {} }
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "evt_1234567890");
        assert_eq!(event.parsed_type(), StripeEventType::CheckoutSessionCompleted);
    }

    #[test]
    fn deserialize_ignores_unknown_fields() {
        let json = r#"{
            "id": "evt_1",
            "object": "event",
            "type": "charge.refunded",
            "created": 1704067200,
            "pending_webhooks": 1,
            "request": {"id": null},
            "data": { "object": {"id": "ch_1"} },
            "livemode": true,
            "api_version": "2023-10-16"
        }"#;

        let event: StripeEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "evt_1");
        assert_eq!(event.parsed_type(), StripeEventType::Unknown);
        assert_eq!(event.data.object["id"], "ch_1");
    }

    #[test]
    fn only_checkout_completion_is_a_known_type() {
        assert_eq!(
            "checkout.session.completed".parse::<StripeEventType>(),
            Ok(StripeEventType::CheckoutSessionCompleted)
        );
        for other in [
            "checkout.session.expired",
            "payment_intent.succeeded",
            "CHECKOUT.SESSION.COMPLETED",
            "",
        ] {
            assert_eq!(other.parse::<StripeEventType>(), Ok(StripeEventType::Unknown), "{other}");
        }
    }

    #[test]
    fn checkout_session_reads_metadata() {
        let event = StripeEventBuilder::new()
            .object(json!({
                "id": "cs_test_1",
                "object": "checkout.session",
                "payment_status": "paid",
                "metadata": { "type": "booking", "time_slot_id": " slot-42 " }
            }))
            .build();

        let session: CheckoutSession = event.deserialize_object().unwrap();

        assert_eq!(session.id, "cs_test_1");
        assert_eq!(session.metadata_value("type"), Some("booking"));
        assert_eq!(session.metadata_value("time_slot_id"), Some("slot-42"));
    }

    #[test]
    fn blank_metadata_values_are_absent() {
        let event = StripeEventBuilder::new()
            .object(json!({ "id": "cs_1", "metadata": { "time_slot_id": "  " } }))
            .build();

        let session: CheckoutSession = event.deserialize_object().unwrap();

        assert_eq!(session.metadata_value("time_slot_id"), None);
        assert_eq!(session.metadata_value("missing"), None);
    }

    #[test]
    fn checkout_session_without_metadata_defaults_empty() {
        let event = StripeEventBuilder::new()
            .object(json!({ "id": "cs_1" }))
            .build();

        let session: CheckoutSession = event.deserialize_object().unwrap();

        assert!(session.metadata.is_empty());
    }
}
