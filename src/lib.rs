//! Studio Edge - serverless-style request handlers for a wellness studio.
//!
//! Two endpoints sit in front of the studio's hosted database:
//! - a Stripe webhook that confirms class bookings once checkout completes
//! - an eligibility check for the introductory offer

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
