//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `http` - Axum endpoints for the webhook and eligibility checks
//! - `store` - Hosted REST, PostgreSQL and in-memory stores
//! - `audit` - Audit sinks backed by `tracing` or memory

pub mod audit;
pub mod http;
pub mod store;

pub use audit::{InMemoryAuditSink, TracingAuditSink};
pub use http::{app_router, AppState};
pub use store::{connect as connect_store, HostedRestStore, InMemoryStore, PostgresStore, StoreHandles};
