//! AuditSink port - structured operational log for request handlers.
//!
//! Handlers receive a sink instead of writing to a global logger, so tests can
//! assert on exactly what a handler reported.

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Warn,
    Error,
}

/// One structured record emitted by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub level: AuditLevel,
    /// Name of the emitting handler, e.g. `stripe_webhook`.
    pub handler: &'static str,
    /// Identifies the request invocation.
    pub invocation_id: Uuid,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl AuditEvent {
    pub fn new(
        level: AuditLevel,
        handler: &'static str,
        invocation_id: Uuid,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            handler,
            invocation_id,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn info(handler: &'static str, invocation_id: Uuid, message: impl Into<String>) -> Self {
        Self::new(AuditLevel::Info, handler, invocation_id, message)
    }

    pub fn warn(handler: &'static str, invocation_id: Uuid, message: impl Into<String>) -> Self {
        Self::new(AuditLevel::Warn, handler, invocation_id, message)
    }

    pub fn error(handler: &'static str, invocation_id: Uuid, message: impl Into<String>) -> Self {
        Self::new(AuditLevel::Error, handler, invocation_id, message)
    }

    pub fn with_field(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    /// Looks up a field value by key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_fields_in_order() {
        let id = Uuid::new_v4();
        let event = AuditEvent::warn("stripe_webhook", id, "bad signature")
            .with_field("event_id", "evt_1")
            .with_field("code", "AUTHENTICATION_ERROR");

        assert_eq!(event.level, AuditLevel::Warn);
        assert_eq!(event.invocation_id, id);
        assert_eq!(event.field("event_id"), Some("evt_1"));
        assert_eq!(event.field("code"), Some("AUTHENTICATION_ERROR"));
        assert_eq!(event.field("missing"), None);
        assert_eq!(event.fields[0].0, "event_id");
    }
}
