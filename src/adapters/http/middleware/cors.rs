//! CORS middleware for browser callers.
//!
//! Every response carries the CORS headers. `OPTIONS` requests are answered
//! here with an empty 200 and never reach a handler.
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, Router};
//!
//! let app = Router::new()
//!     .route("/", post(handler))
//!     .layer(middleware::from_fn(cors_middleware));
//! ```

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type, stripe-signature";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
}

/// Short-circuits preflight requests and decorates all other responses.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}
