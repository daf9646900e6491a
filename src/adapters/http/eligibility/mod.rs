//! Introductory-offer eligibility HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{EligibilityRequest, EligibilityResponse};
pub use handlers::check_intro_eligibility;
pub use routes::eligibility_routes;
