//! Introductory offer configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::eligibility::{OfferMarker, DEFAULT_OFFER_MARKER};

#[derive(Debug, Clone, Deserialize)]
pub struct OfferConfig {
    /// Substring in customer token notes that records a redemption
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl OfferConfig {
    pub fn offer_marker(&self) -> Result<OfferMarker, ValidationError> {
        if self.marker.trim().is_empty() {
            return Err(ValidationError::EmptyOfferMarker);
        }
        OfferMarker::new(self.marker.as_str()).map_err(|_| ValidationError::InvalidOfferMarker)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.offer_marker().map(|_| ())
    }
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
        }
    }
}

fn default_marker() -> String {
    DEFAULT_OFFER_MARKER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker() {
        let marker = OfferConfig::default().offer_marker().unwrap();
        assert_eq!(marker, OfferMarker::default());
    }

    #[test]
    fn test_blank_marker_is_invalid() {
        let config = OfferConfig {
            marker: " ".to_string(),
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyOfferMarker));
    }

    #[test]
    fn test_wildcard_marker_is_invalid() {
        let config = OfferConfig {
            marker: "intro_offer".to_string(),
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidOfferMarker));
    }
}
