//! Dashboard rendering
//!
//! Plain-text tables for the terminal and a serializable view for
//! `--json` consumers.

use hub_core::{ledger, AgentSummary, Amount, HubError, Role};
use hub_store::StoredAccount;
use serde::Serialize;

/// Serializable dashboard state
#[derive(Debug, Serialize)]
pub(crate) struct DashboardView {
    pub(crate) account: hub_core::Account,
    pub(crate) agents: Vec<hub_core::Agent>,
    pub(crate) agent_summary: Option<AgentSummary>,
    pub(crate) total_available: Amount,
}

impl DashboardView {
    /// Build the view from a session record
    pub(crate) fn from_record(record: &StoredAccount) -> Result<Self, HubError> {
        let total_available = ledger::total_available(&record.account, &record.agents)?;
        let agent_summary = if record.account.role.manages_agents() {
            Some(ledger::summarize(&record.agents)?)
        } else {
            None
        };
        Ok(Self {
            account: record.account.clone(),
            agents: record.agents.clone(),
            agent_summary,
            total_available,
        })
    }
}

/// Render the dashboard tables
pub(crate) fn render(view: &DashboardView, base_url: &str, symbol: &str) -> String {
    let mut out = String::new();
    let account = &view.account;

    out.push_str(&format!("{} Dashboard\n", account.role.title()));
    out.push_str(&format!("User ID: {}\n\n", account.user_id));

    if let Some(summary) = &view.agent_summary {
        out.push_str("Your Agent Dashboard\n");
        out.push_str(&format!(
            "  Agents: {}  Referrals: {}  Valid: {}  Earnings via agents: {symbol}{}\n\n",
            summary.agent_count,
            summary.total_referrals,
            summary.total_valid_referrals,
            summary.total_accrued,
        ));

        out.push_str("Agent Performance\n");
        if view.agents.is_empty() {
            out.push_str("  (no agents yet)\n");
        } else {
            out.push_str(&format!(
                "  {:<20} {:>9} {:>6} {:>12} {:>8}  {}\n",
                "Agent", "Referrals", "Valid", "Commission", "Status", "Referral Link"
            ));
            for agent in &view.agents {
                let link = hub_core::build_referral_link(
                    base_url,
                    Role::Ambassador,
                    &account.user_id,
                    Some(&agent.sub_id),
                );
                out.push_str(&format!(
                    "  {:<20} {:>9} {:>6} {symbol}{:>11} {:>8}  {link}\n",
                    agent.name,
                    agent.referral_count,
                    agent.valid_referral_count,
                    agent.accrued_commission.to_string(),
                    agent.status().to_string(),
                ));
            }
        }
        out.push('\n');
    }

    out.push_str("Your Personal Dashboard\n");
    out.push_str(&format!(
        "  Referrals: {}  Valid: {}  Available: {symbol}{}  Paid out: {symbol}{}\n\n",
        account.referral_count,
        account.valid_referral_count,
        account.available_balance,
        account.paid_earnings,
    ));

    out.push_str(&format!(
        "Total available for withdrawal: {symbol}{}\n",
        view.total_available
    ));
    out.push_str(&format!(
        "Your referral link: {}\n",
        hub_core::build_referral_link(base_url, account.role, &account.user_id, None)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::{Account, Agent};

    #[test]
    fn view_totals_match_ledger() {
        let mut record = StoredAccount::new(
            Account::new("u1", Role::FieldAgent).with_balance(Amount::new(42500)),
        );
        record.agents = vec![
            Agent::new("Shoozy B", "s2").with_commission(Amount::new(4000), Amount::ZERO),
        ];
        let view = DashboardView::from_record(&record).unwrap();
        assert_eq!(view.total_available, Amount::new(46500));
        assert_eq!(view.agent_summary.unwrap().agent_count, 1);
    }

    #[test]
    fn ambassador_view_has_no_agent_tables() {
        let record = StoredAccount::new(Account::new("u1", Role::Ambassador));
        let view = DashboardView::from_record(&record).unwrap();
        assert!(view.agent_summary.is_none());

        let text = render(&view, hub_core::DEFAULT_BASE_URL, "₦");
        assert!(text.contains("Ambassador Dashboard"));
        assert!(!text.contains("Agent Performance"));
        assert!(text.contains("v_id=u1"));
    }

    #[test]
    fn field_agent_view_lists_agents() {
        let mut record = StoredAccount::new(Account::new("u1", Role::FieldAgent));
        record.agents =
            vec![Agent::new("Ella Amadi", "abc123").with_commission(
                Amount::new(5000),
                Amount::new(5000),
            )];
        let view = DashboardView::from_record(&record).unwrap();
        let text = render(&view, hub_core::DEFAULT_BASE_URL, "₦");
        assert!(text.contains("Ella Amadi"));
        assert!(text.contains("paid"));
        assert!(text.contains("v_id=u1_abc123"));
        assert!(text.contains("fa_id=u1"));
    }
}
