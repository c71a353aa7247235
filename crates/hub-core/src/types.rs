//! Core types for the Referral Hub
//!
//! Defines the fundamental domain records:
//! - Monetary amounts (whole-naira, checked arithmetic)
//! - Account roles and their wire parameter names
//! - Agent (referred sub-affiliate) records with derived payment status
//! - The signed-in account and its balances

use crate::error::HubError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Non-negative monetary amount in whole naira
///
/// All arithmetic is checked; an operation that would underflow or
/// overflow surfaces as an error instead of wrapping.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Zero amount
    pub const ZERO: Amount = Amount(0);

    /// Create a new amount
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Check for zero
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    #[inline]
    #[must_use]
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction
    #[inline]
    #[must_use]
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl std::fmt::Display for Amount {
    /// Formats with thousands separators, e.g. `42,500`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        f.write_str(&out)
    }
}

/// Account role
///
/// The wire parameter names (`fa_id`, `v_id`) are a stable external
/// contract consumed by the store-listing service; `v_id` predates the
/// ambassador naming and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Recruits and manages referred sub-agents
    FieldAgent,
    /// Earns per direct referral only
    Ambassador,
}

impl Role {
    /// Referral URL query parameter name for this role
    #[inline]
    #[must_use]
    pub const fn param_name(self) -> &'static str {
        match self {
            Role::FieldAgent => "fa_id",
            Role::Ambassador => "v_id",
        }
    }

    /// Human-readable title
    #[inline]
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Role::FieldAgent => "Field Agent",
            Role::Ambassador => "Ambassador",
        }
    }

    /// Whether this role owns a list of referred sub-agents
    #[inline]
    #[must_use]
    pub const fn manages_agents(self) -> bool {
        matches!(self, Role::FieldAgent)
    }
}

impl FromStr for Role {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agent" | "field_agent" => Ok(Role::FieldAgent),
            "ambassador" => Ok(Role::Ambassador),
            other => Err(HubError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Derived payment status of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// All accrued commission has been disbursed
    Paid,
    /// Unpaid commission outstanding (or nothing accrued yet)
    Pending,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AgentStatus::Paid => "paid",
            AgentStatus::Pending => "pending",
        })
    }
}

/// Referred sub-affiliate record
///
/// Class invariant: `paid_commission <= accrued_commission`. The ledger
/// engine rejects records that violate it rather than deriving a
/// negative unpaid amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Display name (non-empty, trimmed)
    pub name: String,
    /// Generated sub-identifier embedded in the agent's referral link
    pub sub_id: String,
    /// Total referrals attributed to this agent
    pub referral_count: u32,
    /// Referrals that passed validation
    pub valid_referral_count: u32,
    /// Commission earned to date
    pub accrued_commission: Amount,
    /// Commission already disbursed
    pub paid_commission: Amount,
    /// Record creation time
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new agent with zeroed counters
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, sub_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_id: sub_id.into(),
            referral_count: 0,
            valid_referral_count: 0,
            accrued_commission: Amount::ZERO,
            paid_commission: Amount::ZERO,
            created_at: Utc::now(),
        }
    }

    /// With referral counters
    #[inline]
    #[must_use]
    pub fn with_referrals(mut self, total: u32, valid: u32) -> Self {
        self.referral_count = total;
        self.valid_referral_count = valid;
        self
    }

    /// With commission amounts
    #[inline]
    #[must_use]
    pub fn with_commission(mut self, accrued: Amount, paid: Amount) -> Self {
        self.accrued_commission = accrued;
        self.paid_commission = paid;
        self
    }

    /// Derived payment status
    ///
    /// `Paid` only when something was accrued and all of it disbursed;
    /// a zero-commission agent is still `Pending`.
    #[inline]
    #[must_use]
    pub fn status(&self) -> AgentStatus {
        if self.paid_commission == self.accrued_commission && !self.accrued_commission.is_zero() {
            AgentStatus::Paid
        } else {
            AgentStatus::Pending
        }
    }

    /// Outstanding unpaid commission
    ///
    /// # Errors
    /// `HubError::InvariantViolation` if `paid > accrued`.
    pub fn unpaid(&self) -> Result<Amount, HubError> {
        self.accrued_commission
            .checked_sub(self.paid_commission)
            .ok_or_else(|| HubError::InvariantViolation {
                agent: self.name.clone(),
                paid: self.paid_commission,
                accrued: self.accrued_commission,
            })
    }
}

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Generated user identifier (embedded in the referral link)
    pub user_id: String,
    /// Account role
    pub role: Role,
    /// Whether a password has been set
    pub activated: bool,
    /// Optional recovery email captured at activation
    pub backup_email: Option<String>,
    /// Personal unpaid earnings eligible for withdrawal
    pub available_balance: Amount,
    /// Personal earnings already disbursed
    pub paid_earnings: Amount,
    /// Lifetime referral count (display stat)
    pub referral_count: u32,
    /// Lifetime valid referral count (display stat)
    pub valid_referral_count: u32,
}

impl Account {
    /// Create a fresh, unactivated account
    #[inline]
    #[must_use]
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            activated: false,
            backup_email: None,
            available_balance: Amount::ZERO,
            paid_earnings: Amount::ZERO,
            referral_count: 0,
            valid_referral_count: 0,
        }
    }

    /// With available balance
    #[inline]
    #[must_use]
    pub fn with_balance(mut self, available: Amount) -> Self {
        self.available_balance = available;
        self
    }

    /// With referral counters
    #[inline]
    #[must_use]
    pub fn with_referrals(mut self, total: u32, valid: u32) -> Self {
        self.referral_count = total;
        self.valid_referral_count = valid;
        self
    }
}

/// Display statistics supplied by the stats backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStats {
    /// Total referrals
    pub referral_count: u32,
    /// Validated referrals
    pub valid_referral_count: u32,
    /// Total earnings to date
    pub total_earnings: Amount,
    /// Number of managed agents (field agents only)
    pub agent_count: Option<u32>,
    /// Number of currently active agents (field agents only)
    pub active_agent_count: Option<u32>,
}

/// Result of a successful withdrawal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// Total amount withdrawn
    pub amount: Amount,
    /// Personal-balance component
    pub personal: Amount,
    /// Component settled from agent commissions
    pub from_agents: Amount,
    /// Number of agent records settled
    pub agents_settled: usize,
    /// When the withdrawal was applied
    pub withdrawn_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_display_grouping() {
        assert_eq!(Amount::new(0).to_string(), "0");
        assert_eq!(Amount::new(500).to_string(), "500");
        assert_eq!(Amount::new(42500).to_string(), "42,500");
        assert_eq!(Amount::new(1_234_567).to_string(), "1,234,567");
    }

    #[test]
    fn amount_checked_arithmetic() {
        let a = Amount::new(5000);
        let b = Amount::new(4000);
        assert_eq!(a.checked_sub(b), Some(Amount::new(1000)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(Amount::new(u64::MAX).checked_add(Amount::new(1)), None);
    }

    #[test]
    fn role_param_names() {
        assert_eq!(Role::FieldAgent.param_name(), "fa_id");
        assert_eq!(Role::Ambassador.param_name(), "v_id");
        assert!(Role::FieldAgent.manages_agents());
        assert!(!Role::Ambassador.manages_agents());
    }

    #[test]
    fn role_from_str() {
        assert_eq!("agent".parse::<Role>().unwrap(), Role::FieldAgent);
        assert_eq!("field_agent".parse::<Role>().unwrap(), Role::FieldAgent);
        assert_eq!("ambassador".parse::<Role>().unwrap(), Role::Ambassador);
        assert!(matches!(
            "vendor".parse::<Role>(),
            Err(HubError::UnknownRole(_))
        ));
    }

    #[test]
    fn agent_status_derivation() {
        let fresh = Agent::new("Victor PoS", "a1b2c3d4e5f6");
        assert_eq!(fresh.status(), AgentStatus::Pending);

        let settled = fresh
            .clone()
            .with_commission(Amount::new(1000), Amount::new(1000));
        assert_eq!(settled.status(), AgentStatus::Paid);

        let partial = fresh.with_commission(Amount::new(1000), Amount::new(400));
        assert_eq!(partial.status(), AgentStatus::Pending);
    }

    #[test]
    fn agent_unpaid_rejects_violation() {
        let bad = Agent::new("x", "s").with_commission(Amount::new(100), Amount::new(200));
        assert!(matches!(
            bad.unpaid(),
            Err(HubError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn account_builder() {
        let account = Account::new("u1", Role::FieldAgent)
            .with_balance(Amount::new(42500))
            .with_referrals(100, 85);
        assert_eq!(account.available_balance, Amount::new(42500));
        assert_eq!(account.referral_count, 100);
        assert!(!account.activated);
    }

    #[test]
    fn role_serde_names() {
        let json = serde_json::to_string(&Role::FieldAgent).unwrap();
        assert_eq!(json, "\"field_agent\"");
        let json = serde_json::to_string(&Role::Ambassador).unwrap();
        assert_eq!(json, "\"ambassador\"");
    }
}
