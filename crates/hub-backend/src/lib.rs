//! Stats backend contract
//!
//! The external-collaborator seam for the service that would supply
//! real referral statistics. No such service exists yet; the only
//! implementation is [`MockStatsApi`], which regenerates hard-coded
//! figures on every call.

#![warn(unreachable_pub)]

pub mod mock;

pub use mock::MockStatsApi;

use async_trait::async_trait;
use hub_core::{AccountStats, Agent, WithdrawalReceipt};

/// Backend errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Backend could not be reached or answered abnormally
    #[error("stats backend unavailable: {0}")]
    Unavailable(String),

    /// Backend does not know the user
    #[error("unknown user: {0}")]
    UnknownUser(String),
}

/// Contract for the stats backend
///
/// All methods are keyed by the owning user's identifier; the caller
/// decides what to do with the results (the store, not the backend,
/// owns session state).
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// Fetch display statistics for an account
    async fn fetch_account_stats(&self, user_id: &str) -> Result<AccountStats, BackendError>;

    /// Fetch the referred agents of an account
    async fn fetch_agents(&self, user_id: &str) -> Result<Vec<Agent>, BackendError>;

    /// Submit a withdrawal of everything outstanding
    async fn submit_withdrawal(&self, user_id: &str) -> Result<WithdrawalReceipt, BackendError>;
}
