//! Error responses for the HTTP endpoints.
//!
//! Both endpoints answer failures with `{"error": "<message>"}`. The webhook
//! endpoint always uses 400; the eligibility endpoint uses the error's
//! default status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::EdgeError;

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Webhook failure. Stripe only distinguishes success from failure, so every
/// error is a 400.
#[derive(Debug)]
pub struct WebhookApiError(pub EdgeError);

impl From<EdgeError> for WebhookApiError {
    fn from(err: EdgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(self.0.message())),
        )
            .into_response()
    }
}

/// Eligibility failure, mapped through `EdgeError::status_code`.
#[derive(Debug)]
pub struct EligibilityApiError(pub EdgeError);

impl From<EdgeError> for EligibilityApiError {
    fn from(err: EdgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for EligibilityApiError {
    fn into_response(self) -> Response {
        (
            self.0.status_code(),
            Json(ErrorBody::new(self.0.message())),
        )
            .into_response()
    }
}
