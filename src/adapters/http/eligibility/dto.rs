//! HTTP DTOs for the eligibility endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::eligibility::Eligibility;

/// Request body. `email` is optional here so that a missing field is
/// reported by the handler as a validation error.
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResponse {
    pub is_eligible: bool,
    /// `null` when eligible.
    pub reason: Option<&'static str>,
}

impl From<Eligibility> for EligibilityResponse {
    fn from(eligibility: Eligibility) -> Self {
        Self {
            is_eligible: eligibility.is_eligible,
            reason: eligibility.reason.map(|r| r.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::eligibility::IneligibleReason;
    use serde_json::json;

    #[test]
    fn eligible_serializes_null_reason() {
        let body = serde_json::to_value(EligibilityResponse::from(Eligibility::eligible())).unwrap();
        assert_eq!(body, json!({"isEligible": true, "reason": null}));
    }

    #[test]
    fn ineligible_serializes_reason_text() {
        let response = EligibilityResponse::from(Eligibility::ineligible(
            IneligibleReason::AlreadyUsedOffer,
        ));
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body, json!({"isEligible": false, "reason": "already used offer"}));
    }

    #[test]
    fn request_tolerates_missing_email() {
        let request: EligibilityRequest = serde_json::from_str("{}").unwrap();
        assert!(request.email.is_none());
    }
}
