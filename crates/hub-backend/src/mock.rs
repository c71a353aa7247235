//! Mock stats provider
//!
//! Hard-coded fixtures standing in for the real backend. Figures are
//! regenerated on every call and carry no state between calls.

use crate::{BackendError, StatsApi};
use async_trait::async_trait;
use hub_core::{ledger, Account, AccountStats, Agent, Amount, Role, WithdrawalReceipt};

/// Mock backend, configured with the session's role
#[derive(Debug, Clone)]
pub struct MockStatsApi {
    role: Role,
}

impl MockStatsApi {
    /// Create a mock backend for the given role
    #[inline]
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    fn sample_agents() -> Vec<Agent> {
        vec![
            Agent::new("Ella Amadi", "1")
                .with_referrals(15, 10)
                .with_commission(Amount::new(5000), Amount::new(5000)),
            Agent::new("Shoozy B", "2")
                .with_referrals(35, 8)
                .with_commission(Amount::new(4000), Amount::ZERO),
            Agent::new("Victor PoS", "3")
                .with_referrals(4, 2)
                .with_commission(Amount::new(1000), Amount::ZERO),
        ]
    }
}

#[async_trait]
impl StatsApi for MockStatsApi {
    async fn fetch_account_stats(&self, user_id: &str) -> Result<AccountStats, BackendError> {
        tracing::debug!(user_id, role = %self.role, "serving mock stats");
        Ok(match self.role {
            Role::FieldAgent => AccountStats {
                referral_count: 100,
                valid_referral_count: 85,
                total_earnings: Amount::new(42500),
                agent_count: Some(8),
                active_agent_count: Some(6),
            },
            Role::Ambassador => AccountStats {
                referral_count: 12,
                valid_referral_count: 10,
                total_earnings: Amount::new(120),
                agent_count: None,
                active_agent_count: None,
            },
        })
    }

    async fn fetch_agents(&self, _user_id: &str) -> Result<Vec<Agent>, BackendError> {
        Ok(match self.role {
            Role::FieldAgent => Self::sample_agents(),
            Role::Ambassador => Vec::new(),
        })
    }

    async fn submit_withdrawal(&self, user_id: &str) -> Result<WithdrawalReceipt, BackendError> {
        // Replay the withdrawal against the fixture state so the
        // receipt matches what the dashboard showed.
        let stats = self.fetch_account_stats(user_id).await?;
        let mut account =
            Account::new(user_id, self.role).with_balance(stats.total_earnings);
        let mut agents = self.fetch_agents(user_id).await?;
        ledger::withdraw(&mut account, &mut agents)
            .map_err(|e| BackendError::Unavailable(e.to_string()))
    }
}
