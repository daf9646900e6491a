//! HTTP adapters - the two public endpoints plus a health check.
//!
//! ```text
//! POST /stripe-webhook            -> ConfirmBookingWebhookHandler
//! POST /check-intro-eligibility   -> CheckOfferEligibilityHandler
//! GET  /health
//! ```
//!
//! CORS headers are added to every response, including request timeouts,
//! and `OPTIONS` is answered by the middleware.

pub mod eligibility;
pub mod error;
pub mod middleware;
pub mod webhook;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware::from_fn, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::timeout::TimeoutLayer;

use crate::application::handlers::{CheckOfferEligibilityHandler, ConfirmBookingWebhookHandler};
use crate::domain::eligibility::OfferMarker;
use crate::domain::webhook::StripeSignatureVerifier;
use crate::ports::{AuditSink, BookingConfirmer, CustomerHistory};

pub use eligibility::eligibility_routes;
pub use error::{EligibilityApiError, ErrorBody, WebhookApiError};
pub use middleware::cors_middleware;
pub use webhook::webhook_routes;

/// Shared application state containing all dependencies.
///
/// Cloned for each request; collaborators are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no signing secret is configured.
    pub webhook_verifier: Option<Arc<StripeSignatureVerifier>>,
    pub booking_confirmer: Arc<dyn BookingConfirmer>,
    pub customer_history: Arc<dyn CustomerHistory>,
    pub offer_marker: OfferMarker,
    pub audit_sink: Arc<dyn AuditSink>,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn webhook_handler(&self) -> ConfirmBookingWebhookHandler {
        ConfirmBookingWebhookHandler::new(
            self.webhook_verifier.clone(),
            self.booking_confirmer.clone(),
            self.audit_sink.clone(),
        )
    }

    pub fn eligibility_handler(&self) -> CheckOfferEligibilityHandler {
        CheckOfferEligibilityHandler::new(
            self.customer_history.clone(),
            self.offer_marker.clone(),
            self.audit_sink.clone(),
        )
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Create the complete application router.
///
/// Requests running past `request_timeout` are answered with 408. The
/// timeout sits inside the CORS layer so that response is decorated too.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/stripe-webhook", webhook_routes())
        .nest("/check-intro-eligibility", eligibility_routes())
        .route("/health", get(health))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(from_fn(cors_middleware))
}
