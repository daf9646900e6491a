//! Axum router configuration for the webhook endpoint.

use axum::{routing::post, Router};

use super::handlers::handle_stripe_webhook;
use crate::adapters::http::AppState;

/// Create the Stripe webhook router.
///
/// Webhooks carry no user credentials; they are authenticated by signature.
///
/// # Routes
/// - `POST /` - Handle a Stripe webhook delivery
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/", post(handle_stripe_webhook))
}
