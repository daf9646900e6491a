//! HTTP handler for introductory-offer eligibility checks.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use crate::application::handlers::eligibility::CheckOfferEligibilityQuery;
use crate::domain::foundation::EdgeError;

use super::super::error::EligibilityApiError;
use super::super::AppState;
use super::dto::{EligibilityRequest, EligibilityResponse};

/// Check whether an email still qualifies for the introductory offer.
///
/// POST /check-intro-eligibility
///
/// The body is parsed here rather than through the `Json` extractor so that
/// malformed input gets the same `{"error"}` shape as every other failure.
pub async fn check_intro_eligibility(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EligibilityResponse>, EligibilityApiError> {
    let request: EligibilityRequest = serde_json::from_slice(&body)
        .map_err(|e| EdgeError::validation(format!("Invalid request body: {}", e)))?;

    let query = CheckOfferEligibilityQuery {
        invocation_id: Uuid::new_v4(),
        email: request.email,
    };

    let eligibility = state.eligibility_handler().handle(query).await?;

    Ok(Json(eligibility.into()))
}
