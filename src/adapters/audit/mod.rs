//! Audit sink adapters.

mod in_memory;
mod tracing_sink;

pub use in_memory::InMemoryAuditSink;
pub use tracing_sink::TracingAuditSink;
