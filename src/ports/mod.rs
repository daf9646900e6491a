//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the handlers and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `BookingConfirmer` - The store's idempotent `confirm_booking` transition
//! - `CustomerHistory` - Paid-booking and offer-redemption lookups
//!
//! ## Observability Ports
//!
//! - `AuditSink` - Structured, injected handler log

mod audit_sink;
mod booking_confirmer;
mod customer_history;

pub use audit_sink::{AuditEvent, AuditLevel, AuditSink};
pub use booking_confirmer::BookingConfirmer;
pub use customer_history::CustomerHistory;
