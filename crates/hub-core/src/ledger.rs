//! Commission ledger engine
//!
//! The derived-state computation at the heart of the dashboard:
//! - Unpaid commission per agent and in aggregate
//! - Total balance available for withdrawal
//! - The withdrawal itself, applied atomically from the caller's
//!   single-threaded perspective (validate everything, then mutate)
//!
//! Invariant maintained at all times and after every withdrawal:
//! `total_available = available_balance + sum(accrued - paid)`.

use crate::error::HubError;
use crate::types::{Account, Agent, Amount, WithdrawalReceipt};
use chrono::Utc;

/// Sum of outstanding unpaid commission across all agents
///
/// Does not mutate its input.
///
/// # Errors
/// - `HubError::InvariantViolation` if any agent has `paid > accrued`
/// - `HubError::AmountOverflow` if the sum overflows
pub fn unpaid_agent_total(agents: &[Agent]) -> Result<Amount, HubError> {
    let mut total = Amount::ZERO;
    for agent in agents {
        total = total
            .checked_add(agent.unpaid()?)
            .ok_or(HubError::AmountOverflow)?;
    }
    Ok(total)
}

/// Grand total available for withdrawal
///
/// Personal available balance plus the unpaid agent total. Always
/// non-negative when every input satisfies `paid <= accrued`; corrupt
/// input is rejected instead of producing a negative balance.
pub fn total_available(account: &Account, agents: &[Agent]) -> Result<Amount, HubError> {
    account
        .available_balance
        .checked_add(unpaid_agent_total(agents)?)
        .ok_or(HubError::AmountOverflow)
}

/// Apply a withdrawal of everything outstanding
///
/// Settles every agent (`paid = accrued`), zeroes the personal
/// available balance, and moves it into paid earnings. All checks run
/// before any field is touched, so a failure leaves the inputs
/// unchanged.
///
/// # Errors
/// - `HubError::NoFundsAvailable` if nothing is outstanding (no-op)
/// - `HubError::InvariantViolation` on a corrupt agent record (no-op)
pub fn withdraw(account: &mut Account, agents: &mut [Agent]) -> Result<WithdrawalReceipt, HubError> {
    let from_agents = unpaid_agent_total(agents)?;
    let personal = account.available_balance;
    let amount = personal
        .checked_add(from_agents)
        .ok_or(HubError::AmountOverflow)?;

    if amount.is_zero() {
        return Err(HubError::NoFundsAvailable);
    }

    let settled_earnings = account
        .paid_earnings
        .checked_add(personal)
        .ok_or(HubError::AmountOverflow)?;

    for agent in agents.iter_mut() {
        agent.paid_commission = agent.accrued_commission;
    }
    account.available_balance = Amount::ZERO;
    account.paid_earnings = settled_earnings;

    tracing::info!(amount = amount.value(), "withdrawal applied");

    Ok(WithdrawalReceipt {
        amount,
        personal,
        from_agents,
        agents_settled: agents.len(),
        withdrawn_at: Utc::now(),
    })
}

/// Aggregate figures for the agent summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AgentSummary {
    /// Number of agents
    pub agent_count: usize,
    /// Referrals across all agents
    pub total_referrals: u64,
    /// Valid referrals across all agents
    pub total_valid_referrals: u64,
    /// Commission accrued across all agents
    pub total_accrued: Amount,
}

/// Summarize an agent list for display
pub fn summarize(agents: &[Agent]) -> Result<AgentSummary, HubError> {
    let mut total_accrued = Amount::ZERO;
    let mut total_referrals = 0u64;
    let mut total_valid = 0u64;
    for agent in agents {
        total_accrued = total_accrued
            .checked_add(agent.accrued_commission)
            .ok_or(HubError::AmountOverflow)?;
        total_referrals += u64::from(agent.referral_count);
        total_valid += u64::from(agent.valid_referral_count);
    }
    Ok(AgentSummary {
        agent_count: agents.len(),
        total_referrals,
        total_valid_referrals: total_valid,
        total_accrued,
    })
}
