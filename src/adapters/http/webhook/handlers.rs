//! HTTP handler for Stripe webhook deliveries.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::application::handlers::booking::ConfirmBookingWebhookCommand;

use super::super::error::WebhookApiError;
use super::super::AppState;

/// Header Stripe signs deliveries with.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

/// Acknowledgement body for a processed delivery.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookReceivedResponse {
    pub received: bool,
}

/// Handle a Stripe webhook delivery.
///
/// POST /stripe-webhook
///
/// The body is taken as raw bytes so the signature is verified over exactly
/// what Stripe sent.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookReceivedResponse>, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = ConfirmBookingWebhookCommand {
        invocation_id: Uuid::new_v4(),
        payload: body.to_vec(),
        signature,
    };

    state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookReceivedResponse { received: true }))
}
