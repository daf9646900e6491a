//! Marker identifying introductory-offer redemptions in token notes.
//!
//! Redemptions are not a first-class record in the hosted store: a customer
//! token whose free-text notes mention the offer counts as a redemption.
//! Keeping the marker in one type means a dedicated redemption flag can
//! later replace it inside a single `CustomerHistory` adapter.

use crate::domain::foundation::EdgeError;

pub const DEFAULT_OFFER_MARKER: &str = "intro offer";

/// Pattern metacharacters of `LIKE` and of the REST `ilike` filter.
pub const MARKER_WILDCARDS: [char; 4] = ['*', '%', '_', '\\'];

/// Case-insensitive substring searched for in token notes.
///
/// Never blank and never contains a `MARKER_WILDCARDS` character, so every
/// store adapter can match it literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferMarker(String);

impl OfferMarker {
    pub fn new(marker: impl Into<String>) -> Result<Self, EdgeError> {
        let marker = marker.into().trim().to_string();
        if marker.is_empty() {
            return Err(EdgeError::configuration("Offer marker must not be empty"));
        }
        if marker.contains(MARKER_WILDCARDS) {
            return Err(EdgeError::configuration(
                "Offer marker must not contain *, %, _ or \\",
            ));
        }
        Ok(Self(marker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `notes` contains the marker, ignoring case.
    pub fn matches(&self, notes: &str) -> bool {
        notes.to_lowercase().contains(&self.0.to_lowercase())
    }

    /// SQL `LIKE` pattern matching the marker anywhere in the text.
    pub fn like_pattern(&self) -> String {
        format!("%{}%", self.0)
    }
}

impl Default for OfferMarker {
    fn default() -> Self {
        Self(DEFAULT_OFFER_MARKER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_ignoring_case() {
        let marker = OfferMarker::default();
        assert!(marker.matches("Redeemed INTRO OFFER on 2024-03-01"));
        assert!(marker.matches("intro offer"));
        assert!(!marker.matches("regular class pack"));
        assert!(!marker.matches(""));
    }

    #[test]
    fn marker_is_trimmed() {
        let marker = OfferMarker::new("  First Class  ").unwrap();
        assert_eq!(marker.as_str(), "First Class");
        assert!(marker.matches("used first class promo"));
    }

    #[test]
    fn blank_marker_is_rejected() {
        assert!(matches!(
            OfferMarker::new("   "),
            Err(EdgeError::Configuration(_))
        ));
    }

    #[test]
    fn wildcard_characters_are_rejected() {
        for raw in ["intro*", "50% off", "intro_offer", "intro\\offer"] {
            assert!(
                matches!(OfferMarker::new(raw), Err(EdgeError::Configuration(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn like_pattern_wraps_marker() {
        assert_eq!(OfferMarker::default().like_pattern(), "%intro offer%");
        assert_eq!(
            OfferMarker::new("first-class (free)").unwrap().like_pattern(),
            "%first-class (free)%"
        );
    }
}
