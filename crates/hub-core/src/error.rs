//! Error types for the Referral Hub domain core
//!
//! Covers:
//! - Recoverable user-input failures (weak password, empty agent name)
//! - Ledger preconditions (no funds available)
//! - Environment capability gaps (share unsupported)
//! - Data-integrity violations (paid commission exceeding accrued)

use crate::password::StrengthReport;
use crate::types::Amount;

/// Main domain error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HubError {
    /// Password failed one or more strength rules
    #[error("password does not meet strength requirements")]
    WeakPassword {
        /// Which rules passed and which failed
        report: StrengthReport,
    },

    /// Agent name was empty after trimming
    #[error("agent name must not be empty")]
    EmptyAgentName,

    /// Withdrawal attempted with nothing to withdraw
    #[error("no funds available for withdrawal")]
    NoFundsAvailable,

    /// Environment has no share integration configured
    #[error("no share integration is available in this environment")]
    ShareUnsupported,

    /// Agent record with paid commission exceeding accrued commission
    #[error("data integrity violation for agent '{agent}': paid {paid} exceeds accrued {accrued}")]
    InvariantViolation {
        /// Offending agent name
        agent: String,
        /// Paid commission on the record
        paid: Amount,
        /// Accrued commission on the record
        accrued: Amount,
    },

    /// Amount arithmetic overflowed
    #[error("amount arithmetic overflowed")]
    AmountOverflow,

    /// Unrecognized role name
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Referral link that does not match the stable URL contract
    #[error("malformed referral link: {0}")]
    MalformedLink(String),
}

impl HubError {
    /// Check if the error is recoverable by a new user action
    ///
    /// Integrity violations and arithmetic overflow indicate corrupt
    /// data; everything else is a retryable input or environment issue.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InvariantViolation { .. } | Self::AmountOverflow
        )
    }

    /// Check if the error indicates corrupt stored data
    #[inline]
    #[must_use]
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}
