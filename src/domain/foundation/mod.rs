//! Shared domain building blocks.

mod errors;

pub use errors::EdgeError;
