//! Audit sink that forwards records to `tracing`.

use crate::ports::{AuditEvent, AuditLevel, AuditSink};

/// Emits each audit record as a structured `tracing` event.
///
/// Dynamic fields are rendered as `key=value` pairs in a single `fields`
/// attribute, since `tracing` field names must be known at compile time.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

fn render_fields(event: &AuditEvent) -> String {
    event
        .fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        let fields = render_fields(&event);
        match event.level {
            AuditLevel::Info => tracing::info!(
                handler = event.handler,
                invocation_id = %event.invocation_id,
                fields = %fields,
                "{}",
                event.message
            ),
            AuditLevel::Warn => tracing::warn!(
                handler = event.handler,
                invocation_id = %event.invocation_id,
                fields = %fields,
                "{}",
                event.message
            ),
            AuditLevel::Error => tracing::error!(
                handler = event.handler,
                invocation_id = %event.invocation_id,
                fields = %fields,
                "{}",
                event.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn fields_render_in_insertion_order() {
        let event = AuditEvent::info("stripe_webhook", Uuid::new_v4(), "Booking confirmed")
            .with_field("event_id", "evt_1")
            .with_field("time_slot_id", "slot-9");

        assert_eq!(render_fields(&event), "event_id=evt_1 time_slot_id=slot-9");
    }

    #[test]
    fn record_does_not_require_subscriber() {
        TracingAuditSink::new().record(AuditEvent::error(
            "intro_offer_eligibility",
            Uuid::new_v4(),
            "Eligibility check failed",
        ));
    }
}
