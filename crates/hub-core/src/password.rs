//! Password strength rules
//!
//! Activation requires all three predicates; the report carries every
//! predicate result so the caller can show the user which rules failed.

use serde::{Deserialize, Serialize};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of strength rules
pub const RULE_COUNT: u8 = 3;

/// Per-rule results of a strength check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthReport {
    /// At least [`MIN_PASSWORD_LENGTH`] characters
    pub min_length: bool,
    /// Contains at least one ASCII digit
    pub has_digit: bool,
    /// Contains at least one ASCII uppercase letter
    pub has_uppercase: bool,
}

impl StrengthReport {
    /// Whether every rule passed
    #[inline]
    #[must_use]
    pub const fn all_passed(self) -> bool {
        self.min_length && self.has_digit && self.has_uppercase
    }

    /// Number of rules satisfied, out of [`RULE_COUNT`]
    #[inline]
    #[must_use]
    pub fn satisfied_count(self) -> u8 {
        u8::from(self.min_length) + u8::from(self.has_digit) + u8::from(self.has_uppercase)
    }
}

/// Evaluate the strength rules against a candidate password
#[must_use]
pub fn check_password_rules(password: &str) -> StrengthReport {
    StrengthReport {
        min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
        has_digit: password.chars().any(|c| c.is_ascii_digit()),
        has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
    }
}
