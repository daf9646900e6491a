//! Axum router configuration for the eligibility endpoint.

use axum::{routing::post, Router};

use super::handlers::check_intro_eligibility;
use crate::adapters::http::AppState;

/// # Routes
/// - `POST /` - Check introductory-offer eligibility for an email
pub fn eligibility_routes() -> Router<AppState> {
    Router::new().route("/", post(check_intro_eligibility))
}
