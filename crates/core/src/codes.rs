//! Codes and Emails
//!
//! Coupon codes and customer emails are compared case-insensitively and
//! without surrounding whitespace. Both are normalised once, on construction,
//! so every later comparison is a plain equality check.

use std::fmt;

/// A trimmed, upper-cased discount or gift-card code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiscountCode(String);

impl DiscountCode {
    /// Normalise a raw code. Returns `None` when nothing is left after trimming.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return None;
        }

        Some(Self(trimmed.to_uppercase()))
    }

    /// The normalised code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against an un-normalised code.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        Self::parse(raw).is_some_and(|other| other == *self)
    }
}

impl fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DiscountCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A trimmed, lower-cased customer email.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    /// Normalise a raw email. Blank input means "no email supplied".
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return None;
        }

        Some(Self(trimmed.to_lowercase()))
    }

    /// The normalised email.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_normalise_case_and_whitespace() {
        let spaced = DiscountCode::parse(" save10 ");
        let upper = DiscountCode::parse("SAVE10");
        let mixed = DiscountCode::parse("Save10");

        assert_eq!(spaced, upper);
        assert_eq!(upper, mixed);
        assert_eq!(mixed.as_ref().map(DiscountCode::as_str), Some("SAVE10"));
    }

    #[test]
    fn blank_codes_are_rejected() {
        assert_eq!(DiscountCode::parse(""), None);
        assert_eq!(DiscountCode::parse("   \t"), None);
    }

    #[test]
    fn matches_ignores_case() {
        let code = DiscountCode::parse("FreeShip");

        assert!(code.as_ref().is_some_and(|code| code.matches(" freeship")));
        assert!(!code.as_ref().is_some_and(|code| code.matches("freeship2")));
    }

    #[test]
    fn emails_are_lower_cased() {
        let email = CustomerEmail::parse("  Ada@Example.COM ");

        assert_eq!(email.as_ref().map(CustomerEmail::as_str), Some("ada@example.com"));
        assert_eq!(CustomerEmail::parse(" "), None);
    }
}
