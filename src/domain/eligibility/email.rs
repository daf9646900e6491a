//! Customer identity by normalized email.

use std::fmt;

use crate::domain::foundation::EdgeError;

/// An email address trimmed and lower-cased.
///
/// Customers are identified only by matching email strings across bookings
/// and tokens, so every lookup goes through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedEmail(String);

impl NormalizedEmail {
    /// Normalizes `raw`. Blank input is rejected.
    pub fn parse(raw: &str) -> Result<Self, EdgeError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EdgeError::validation("Email is required"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trims_and_lowercases() {
        let email = NormalizedEmail::parse("  User@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn mixed_case_and_padding_resolve_to_same_identity() {
        assert_eq!(
            NormalizedEmail::parse("User@Example.com ").unwrap(),
            NormalizedEmail::parse("user@example.com").unwrap()
        );
    }

    #[test]
    fn blank_is_rejected() {
        assert_eq!(
            NormalizedEmail::parse(" \t\n"),
            Err(EdgeError::validation("Email is required"))
        );
        assert!(NormalizedEmail::parse("").is_err());
    }

    #[test]
    fn display_matches_as_str() {
        let email = NormalizedEmail::parse("A@B.C").unwrap();
        assert_eq!(email.to_string(), email.as_str());
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "[ \t]{0,3}[A-Za-z0-9._%+-]{1,20}@[A-Za-z0-9.-]{1,20}[ \t]{0,3}") {
            let once = NormalizedEmail::parse(&raw).unwrap();
            let twice = NormalizedEmail::parse(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn case_and_padding_never_change_identity(raw in "[A-Za-z0-9._-]{1,20}@[A-Za-z0-9.-]{1,20}", pad in "[ \t]{0,4}") {
            let plain = NormalizedEmail::parse(&raw.to_lowercase()).unwrap();
            let shouted = NormalizedEmail::parse(&format!("{}{}{}", pad, raw.to_uppercase(), pad)).unwrap();
            prop_assert_eq!(plain, shouted);
        }
    }
}
