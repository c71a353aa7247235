//! Referral Hub domain core
//!
//! The engine behind the referral dashboard:
//! - Domain records: roles, amounts, agents, accounts
//! - The commission ledger (unpaid totals, atomic withdrawal)
//! - Referral identifier generation and URL composition
//! - Password strength rules
//!
//! # Example
//!
//! ```rust
//! use hub_core::{ledger, Account, Agent, Amount, Role};
//!
//! let mut account = Account::new("u1", Role::FieldAgent)
//!     .with_balance(Amount::new(42500));
//! let mut agents = vec![
//!     Agent::new("Shoozy B", "s2").with_commission(Amount::new(4000), Amount::ZERO),
//! ];
//!
//! let receipt = ledger::withdraw(&mut account, &mut agents)?;
//! assert_eq!(receipt.amount, Amount::new(46500));
//! # Ok::<(), hub_core::HubError>(())
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod ledger;
pub mod link;
pub mod password;
pub mod types;

// Re-exports for convenience
pub use config::{HubConfig, DEFAULT_BASE_URL, DEFAULT_REFRESH_SECS};
pub use error::HubError;
pub use ledger::{summarize, total_available, unpaid_agent_total, withdraw, AgentSummary};
pub use link::{build_referral_link, generate_referral_id, ReferralLink, REFERRAL_ID_LEN};
pub use password::{check_password_rules, StrengthReport, MIN_PASSWORD_LENGTH};
pub use types::{
    Account, AccountStats, Agent, AgentStatus, Amount, Role, WithdrawalReceipt,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
