//! ConfirmBookingWebhookHandler - Command handler for payment provider webhooks.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::foundation::EdgeError;
use crate::domain::webhook::{StripeEvent, StripeSignatureVerifier, WebhookAction};
use crate::ports::{AuditEvent, AuditSink, BookingConfirmer};

const HANDLER_NAME: &str = "stripe_webhook";

/// Command to handle one inbound webhook delivery.
#[derive(Debug, Clone)]
pub struct ConfirmBookingWebhookCommand {
    pub invocation_id: Uuid,
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of the `stripe-signature` header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A booking checkout completed and the confirmation transition ran.
    BookingConfirmed {
        event_id: String,
        time_slot_id: String,
        stripe_session_id: String,
    },
    /// Verified event with nothing to do.
    Acknowledged {
        event_id: String,
        event_type: String,
        reason: &'static str,
    },
}

/// Verifies a Stripe webhook and applies the booking confirmation it carries.
///
/// The signing secret may be absent from configuration; that surfaces per
/// request as a configuration error rather than at startup.
pub struct ConfirmBookingWebhookHandler {
    verifier: Option<Arc<StripeSignatureVerifier>>,
    confirmer: Arc<dyn BookingConfirmer>,
    audit: Arc<dyn AuditSink>,
}

impl ConfirmBookingWebhookHandler {
    pub fn new(
        verifier: Option<Arc<StripeSignatureVerifier>>,
        confirmer: Arc<dyn BookingConfirmer>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            verifier,
            confirmer,
            audit,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmBookingWebhookCommand,
    ) -> Result<WebhookOutcome, EdgeError> {
        let mut event_id = None;
        let result = self.process(&cmd, &mut event_id).await;

        match &result {
            Ok(outcome) => self.audit.record(outcome_event(cmd.invocation_id, outcome)),
            Err(err) => {
                let event = match err {
                    EdgeError::Authentication(_) => AuditEvent::warn(
                        HANDLER_NAME,
                        cmd.invocation_id,
                        "Webhook rejected: signature did not verify",
                    ),
                    _ => AuditEvent::error(HANDLER_NAME, cmd.invocation_id, "Webhook failed"),
                };
                let mut event = event
                    .with_field("code", err.code())
                    .with_field("error", err.message());
                if let Some(id) = event_id {
                    event = event.with_field("event_id", id);
                }
                self.audit.record(event);
            }
        }

        result
    }

    async fn process(
        &self,
        cmd: &ConfirmBookingWebhookCommand,
        event_id: &mut Option<String>,
    ) -> Result<WebhookOutcome, EdgeError> {
        // 1. Secret must be configured
        let verifier = self
            .verifier
            .as_ref()
            .ok_or_else(|| EdgeError::configuration("Webhook signing secret is not configured"))?;

        // 2. Verify against the raw bytes
        let signature = cmd
            .signature
            .as_deref()
            .ok_or_else(|| EdgeError::authentication("Missing stripe-signature header"))?;
        verifier.verify(&cmd.payload, signature)?;

        // 3. Parse the verified body
        let event: StripeEvent = serde_json::from_slice(&cmd.payload)
            .map_err(|e| EdgeError::validation(format!("Invalid webhook payload: {}", e)))?;
        *event_id = Some(event.id.clone());

        // 4. Decide and act
        match WebhookAction::from_event(&event)? {
            WebhookAction::ConfirmBooking(confirmation) => {
                self.confirmer.confirm_booking(&confirmation).await?;
                Ok(WebhookOutcome::BookingConfirmed {
                    event_id: event.id,
                    time_slot_id: confirmation.time_slot_id,
                    stripe_session_id: confirmation.stripe_session_id,
                })
            }
            WebhookAction::Ignore(reason) => Ok(WebhookOutcome::Acknowledged {
                event_id: event.id,
                event_type: event.event_type,
                reason,
            }),
        }
    }
}

fn outcome_event(invocation_id: Uuid, outcome: &WebhookOutcome) -> AuditEvent {
    match outcome {
        WebhookOutcome::BookingConfirmed {
            event_id,
            time_slot_id,
            stripe_session_id,
        } => AuditEvent::info(HANDLER_NAME, invocation_id, "Booking confirmed")
            .with_field("event_id", event_id.as_str())
            .with_field("time_slot_id", time_slot_id.as_str())
            .with_field("stripe_session_id", stripe_session_id.as_str()),
        WebhookOutcome::Acknowledged {
            event_id,
            event_type,
            reason,
        } => AuditEvent::info(HANDLER_NAME, invocation_id, "Webhook acknowledged")
            .with_field("event_id", event_id.as_str())
            .with_field("event_type", event_type.as_str())
            .with_field("reason", *reason),
    }
}
