//! CheckOfferEligibilityHandler - Query handler for introductory-offer eligibility.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::eligibility::{Eligibility, NormalizedEmail, OfferMarker};
use crate::domain::foundation::EdgeError;
use crate::ports::{AuditEvent, AuditSink, CustomerHistory};

const HANDLER_NAME: &str = "intro_offer_eligibility";

/// Query for a customer's introductory-offer eligibility.
#[derive(Debug, Clone)]
pub struct CheckOfferEligibilityQuery {
    pub invocation_id: Uuid,
    /// Email as submitted; normalized before any lookup.
    pub email: Option<String>,
}

/// Answers whether a customer still qualifies for the introductory offer.
pub struct CheckOfferEligibilityHandler {
    history: Arc<dyn CustomerHistory>,
    marker: OfferMarker,
    audit: Arc<dyn AuditSink>,
}

impl CheckOfferEligibilityHandler {
    pub fn new(
        history: Arc<dyn CustomerHistory>,
        marker: OfferMarker,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            history,
            marker,
            audit,
        }
    }

    pub async fn handle(&self, query: CheckOfferEligibilityQuery) -> Result<Eligibility, EdgeError> {
        let result = self.evaluate(query.email.as_deref()).await;

        let event = match &result {
            Ok(eligibility) => {
                let event = AuditEvent::info(HANDLER_NAME, query.invocation_id, "Eligibility checked")
                    .with_field("is_eligible", eligibility.is_eligible.to_string());
                match eligibility.reason {
                    Some(reason) => event.with_field("reason", reason.as_str()),
                    None => event,
                }
            }
            Err(err) => AuditEvent::error(HANDLER_NAME, query.invocation_id, "Eligibility check failed")
                .with_field("code", err.code())
                .with_field("error", err.message()),
        };
        self.audit.record(event);

        result
    }

    async fn evaluate(&self, email: Option<&str>) -> Result<Eligibility, EdgeError> {
        let email = email.ok_or_else(|| EdgeError::validation("Email is required"))?;
        let email = NormalizedEmail::parse(email)?;

        // Both checks are independent; the decision does not depend on order.
        let (has_paid_booking, has_redeemed_offer) = tokio::try_join!(
            self.history.has_paid_booking(&email),
            self.history.has_redeemed_offer(&email, &self.marker),
        )?;

        Ok(Eligibility::from_checks(has_paid_booking, has_redeemed_offer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::eligibility::IneligibleReason;
    use crate::ports::AuditLevel;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct MockHistory {
        paid_emails: Vec<String>,
        token_notes: Vec<(String, String)>,
        fail_bookings: bool,
        lookups: Mutex<Vec<String>>,
    }

    impl MockHistory {
        fn with_paid_booking(mut self, email: &str) -> Self {
            self.paid_emails.push(email.to_string());
            self
        }

        fn with_token(mut self, email: &str, notes: &str) -> Self {
            self.token_notes.push((email.to_string(), notes.to_string()));
            self
        }

        fn failing_bookings(mut self) -> Self {
            self.fail_bookings = true;
            self
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CustomerHistory for MockHistory {
        async fn has_paid_booking(&self, email: &NormalizedEmail) -> Result<bool, EdgeError> {
            self.lookups.lock().unwrap().push(email.as_str().to_string());
            if self.fail_bookings {
                return Err(EdgeError::upstream_query("bookings query failed"));
            }
            Ok(self.paid_emails.iter().any(|e| e == email.as_str()))
        }

        async fn has_redeemed_offer(
            &self,
            email: &NormalizedEmail,
            marker: &OfferMarker,
        ) -> Result<bool, EdgeError> {
            Ok(self
                .token_notes
                .iter()
                .any(|(e, notes)| e == email.as_str() && marker.matches(notes)))
        }
    }

    struct RecordingSink {
        events: Mutex<Vec<AuditEvent>>,
    }

    impl AuditSink for RecordingSink {
        fn record(&self, event: AuditEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn sink() -> Arc<RecordingSink> {
        Arc::new(RecordingSink {
            events: Mutex::new(Vec::new()),
        })
    }

    fn handler(history: Arc<MockHistory>, sink: Arc<RecordingSink>) -> CheckOfferEligibilityHandler {
        CheckOfferEligibilityHandler::new(history, OfferMarker::default(), sink)
    }

    fn query(email: Option<&str>) -> CheckOfferEligibilityQuery {
        CheckOfferEligibilityQuery {
            invocation_id: Uuid::new_v4(),
            email: email.map(str::to_string),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn new_customer_is_eligible() {
        let result = handler(Arc::new(MockHistory::default()), sink())
            .handle(query(Some("new@example.com")))
            .await
            .unwrap();

        assert_eq!(result, Eligibility::eligible());
    }

    #[tokio::test]
    async fn paid_booking_wins_over_token_history() {
        let history = MockHistory::default()
            .with_paid_booking("user@example.com")
            .with_token("user@example.com", "Intro Offer redeemed");

        let result = handler(Arc::new(history), sink())
            .handle(query(Some("user@example.com")))
            .await
            .unwrap();

        assert_eq!(result.reason, Some(IneligibleReason::PreviousBookings));
        assert!(!result.is_eligible);
    }

    #[tokio::test]
    async fn token_with_marker_means_already_used() {
        let history = MockHistory::default().with_token("user@example.com", "used INTRO OFFER");

        let result = handler(Arc::new(history), sink())
            .handle(query(Some("user@example.com")))
            .await
            .unwrap();

        assert_eq!(
            result,
            Eligibility::ineligible(IneligibleReason::AlreadyUsedOffer)
        );
    }

    #[tokio::test]
    async fn token_without_marker_does_not_disqualify() {
        let history = MockHistory::default().with_token("user@example.com", "10-class pack");

        let result = handler(Arc::new(history), sink())
            .handle(query(Some("user@example.com")))
            .await
            .unwrap();

        assert!(result.is_eligible);
    }

    #[tokio::test]
    async fn email_is_normalized_before_lookup() {
        let history = Arc::new(MockHistory::default().with_paid_booking("user@example.com"));

        let padded = handler(history.clone(), sink())
            .handle(query(Some("User@Example.com ")))
            .await
            .unwrap();
        let plain = handler(history.clone(), sink())
            .handle(query(Some("user@example.com")))
            .await
            .unwrap();

        assert_eq!(padded, plain);
        assert_eq!(history.lookups(), vec!["user@example.com", "user@example.com"]);
    }

    #[tokio::test]
    async fn missing_email_is_validation_error() {
        let history = Arc::new(MockHistory::default());
        let sink = sink();

        let result = handler(history.clone(), sink.clone()).handle(query(None)).await;

        assert_eq!(result, Err(EdgeError::validation("Email is required")));
        assert!(history.lookups().is_empty());
        assert_eq!(sink.events.lock().unwrap()[0].level, AuditLevel::Error);
    }

    #[tokio::test]
    async fn blank_email_is_validation_error() {
        let result = handler(Arc::new(MockHistory::default()), sink())
            .handle(query(Some("   ")))
            .await;

        assert!(matches!(result, Err(EdgeError::Validation(_))));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let history = MockHistory::default().failing_bookings();

        let result = handler(Arc::new(history), sink())
            .handle(query(Some("user@example.com")))
            .await;

        assert_eq!(result, Err(EdgeError::upstream_query("bookings query failed")));
    }

    #[tokio::test]
    async fn outcome_is_audited_with_reason() {
        let history = MockHistory::default().with_paid_booking("user@example.com");
        let sink = sink();

        handler(Arc::new(history), sink.clone())
            .handle(query(Some("user@example.com")))
            .await
            .unwrap();

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("is_eligible"), Some("false"));
        assert_eq!(events[0].field("reason"), Some("previous bookings"));
    }
}
