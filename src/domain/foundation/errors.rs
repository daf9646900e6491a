//! Error taxonomy shared by both request handlers.
//!
//! Every failure a handler can produce falls into one of four categories.
//! Each category carries a default HTTP status and a retry hint; the HTTP
//! adapters decide the final status code per endpoint.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors produced while handling a webhook or eligibility request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeError {
    /// A required secret or setting is absent. Fatal, never retried.
    #[error("{0}")]
    Configuration(String),

    /// The request could not be authenticated (signature missing, stale or mismatched).
    #[error("{0}")]
    Authentication(String),

    /// A required input field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The hosted store rejected or failed a query.
    #[error("{0}")]
    UpstreamQuery(String),
}

impl EdgeError {
    pub fn configuration(message: impl Into<String>) -> Self {
        EdgeError::Configuration(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        EdgeError::Authentication(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        EdgeError::Validation(message.into())
    }

    pub fn upstream_query(message: impl Into<String>) -> Self {
        EdgeError::UpstreamQuery(message.into())
    }

    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            EdgeError::Configuration(_) => "CONFIGURATION_ERROR",
            EdgeError::Authentication(_) => "AUTHENTICATION_ERROR",
            EdgeError::Validation(_) => "VALIDATION_ERROR",
            EdgeError::UpstreamQuery(_) => "UPSTREAM_QUERY_ERROR",
        }
    }

    /// Human-readable message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            EdgeError::Configuration(msg)
            | EdgeError::Authentication(msg)
            | EdgeError::Validation(msg)
            | EdgeError::UpstreamQuery(msg) => msg,
        }
    }

    /// Returns true if the caller may succeed by retrying the same request.
    ///
    /// Only store failures are transient. Retries themselves are left to the
    /// caller (or the payment provider's redelivery-on-non-2xx).
    pub fn is_retryable(&self) -> bool {
        matches!(self, EdgeError::UpstreamQuery(_))
    }

    /// Default HTTP status for this error category.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EdgeError::Authentication(_) | EdgeError::Validation(_) => StatusCode::BAD_REQUEST,
            EdgeError::Configuration(_) | EdgeError::UpstreamQuery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
