//! Hosted REST/RPC implementation of the store ports.
//!
//! Talks to the hosted database's PostgREST-style interface with the
//! service credential:
//! - `POST /rest/v1/rpc/confirm_booking` confirms a booking transactionally
//! - `GET /rest/v1/bookings` and `GET /rest/v1/customer_tokens` answer
//!   existence questions (`select=id&limit=1`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::eligibility::{NormalizedEmail, OfferMarker};
use crate::domain::foundation::EdgeError;
use crate::domain::webhook::BookingConfirmation;
use crate::ports::{BookingConfirmer, CustomerHistory};

/// Error code the REST interface returns when a query matched no rows.
const NO_ROWS_CODE: &str = "PGRST116";

const CONFIRM_BOOKING_RPC: &str = "confirm_booking";

/// Store adapter backed by the hosted REST interface.
pub struct HostedRestStore {
    base_url: String,
    service_key: SecretString,
    client: Client,
}

impl HostedRestStore {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        service_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, EdgeError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            EdgeError::configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key,
            client,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose_secret();
        request.header("apikey", key).bearer_auth(key)
    }

    fn confirm_request(&self, confirmation: &BookingConfirmation) -> Result<Request, EdgeError> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, CONFIRM_BOOKING_RPC);
        let params = ConfirmBookingParams {
            p_time_slot_id: &confirmation.time_slot_id,
            p_stripe_session_id: &confirmation.stripe_session_id,
        };

        self.authorized(self.client.post(url))
            .json(&params)
            .build()
            .map_err(build_failed)
    }

    /// `GET /rest/v1/<table>?select=id&<filters>&limit=1`
    fn rows_request(&self, table: &str, filters: &[(&str, String)]) -> Result<Request, EdgeError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let mut query: Vec<(&str, String)> = vec![("select", "id".to_string())];
        query.extend(filters.iter().cloned());
        query.push(("limit", "1".to_string()));

        self.authorized(self.client.get(url))
            .query(&query)
            .build()
            .map_err(build_failed)
    }

    fn paid_booking_request(&self, email: &NormalizedEmail) -> Result<Request, EdgeError> {
        self.rows_request(
            "bookings",
            &[
                ("customer_email", format!("eq.{}", email)),
                ("payment_status", "eq.paid".to_string()),
            ],
        )
    }

    fn redeemed_offer_request(
        &self,
        email: &NormalizedEmail,
        marker: &OfferMarker,
    ) -> Result<Request, EdgeError> {
        self.rows_request(
            "customer_tokens",
            &[
                ("customer_email", format!("eq.{}", email)),
                ("notes", ilike_filter(marker)),
            ],
        )
    }

    async fn execute(&self, request: Request) -> Result<Response, EdgeError> {
        self.client
            .execute(request)
            .await
            .map_err(|e| EdgeError::upstream_query(format!("Store request failed: {}", e)))
    }

    async fn any_row(&self, request: Request) -> Result<bool, EdgeError> {
        let response = self.execute(request).await?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| EdgeError::upstream_query(format!("Store response unreadable: {}", e)))?;

        interpret_rows(status, &body)
    }
}

fn build_failed(e: reqwest::Error) -> EdgeError {
    EdgeError::configuration(format!("Invalid store request: {}", e))
}

#[derive(Debug, Serialize)]
struct ConfirmBookingParams<'a> {
    p_time_slot_id: &'a str,
    p_stripe_session_id: &'a str,
}

/// Error body returned by the REST interface on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct RestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn parse_error_body(body: &str) -> RestErrorBody {
    serde_json::from_str(body).unwrap_or_default()
}

fn upstream_error(operation: &str, status: u16, body: &str) -> EdgeError {
    let error = parse_error_body(body);
    let message = error
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    EdgeError::upstream_query(format!("{} failed ({}): {}", operation, status, message))
}

/// Interprets an existence query response.
///
/// A 2xx response matches when it holds at least one row. A "no rows" error
/// code means no match. Anything else is an upstream failure.
fn interpret_rows(status: u16, body: &str) -> Result<bool, EdgeError> {
    if (200..300).contains(&status) {
        let rows: Vec<serde_json::Value> = serde_json::from_str(body).map_err(|e| {
            EdgeError::upstream_query(format!("Store returned an invalid row set: {}", e))
        })?;
        return Ok(!rows.is_empty());
    }

    if parse_error_body(body).code.as_deref() == Some(NO_ROWS_CODE) {
        return Ok(false);
    }

    Err(upstream_error("Store query", status, body))
}

fn interpret_rpc(status: u16, body: &str) -> Result<(), EdgeError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(upstream_error("Booking confirmation", status, body))
    }
}

/// PostgREST `ilike` pattern; `*` is its wildcard.
///
/// `OfferMarker` never holds `*`, `%`, `_` or `\`, so the marker is
/// matched literally here and by the `ILIKE` in the Postgres adapter.
fn ilike_filter(marker: &OfferMarker) -> String {
    format!("ilike.*{}*", marker.as_str())
}

#[async_trait]
impl BookingConfirmer for HostedRestStore {
    async fn confirm_booking(&self, confirmation: &BookingConfirmation) -> Result<(), EdgeError> {
        let request = self.confirm_request(confirmation)?;
        let response = self.execute(request).await?;

        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(status, error = %body, "confirm_booking RPC failed");
        interpret_rpc(status, &body)
    }
}

#[async_trait]
impl CustomerHistory for HostedRestStore {
    async fn has_paid_booking(&self, email: &NormalizedEmail) -> Result<bool, EdgeError> {
        let request = self.paid_booking_request(email)?;
        self.any_row(request).await
    }

    async fn has_redeemed_offer(
        &self,
        email: &NormalizedEmail,
        marker: &OfferMarker,
    ) -> Result<bool, EdgeError> {
        let request = self.redeemed_offer_request(email, marker)?;
        self.any_row(request).await
    }
}
