//! Property tests for the commission ledger
//!
//! Random valid fixtures (every agent satisfying `paid <= accrued`)
//! must never produce a negative or inconsistent balance, and a
//! withdrawal must always reconcile to zero.

use hub_core::{ledger, Account, Agent, Amount, HubError, Role};
use proptest::prelude::*;

fn arb_agent() -> impl Strategy<Value = Agent> {
    (0u64..=1_000_000).prop_flat_map(|accrued| {
        (Just(accrued), 0u64..=accrued, 0u32..200, "[a-z]{2,10}").prop_map(
            |(accrued, paid, referrals, name)| {
                Agent::new(name, hub_core::generate_referral_id())
                    .with_referrals(referrals, referrals / 2)
                    .with_commission(Amount::new(accrued), Amount::new(paid))
            },
        )
    })
}

fn arb_account() -> impl Strategy<Value = Account> {
    (0u64..=10_000_000).prop_map(|balance| {
        Account::new("u1", Role::FieldAgent).with_balance(Amount::new(balance))
    })
}

proptest! {
    #[test]
    fn unpaid_total_is_the_sum_of_unpaid_parts(agents in prop::collection::vec(arb_agent(), 0..12)) {
        let total = ledger::unpaid_agent_total(&agents).unwrap();
        let expected: u64 = agents
            .iter()
            .map(|a| a.accrued_commission.value() - a.paid_commission.value())
            .sum();
        prop_assert_eq!(total, Amount::new(expected));
    }

    #[test]
    fn total_available_is_balance_plus_agent_total(
        account in arb_account(),
        agents in prop::collection::vec(arb_agent(), 0..12),
    ) {
        let agent_total = ledger::unpaid_agent_total(&agents).unwrap();
        let total = ledger::total_available(&account, &agents).unwrap();
        prop_assert_eq!(
            total,
            account.available_balance.checked_add(agent_total).unwrap()
        );
    }

    #[test]
    fn withdrawal_reconciles_to_zero(
        mut account in arb_account(),
        mut agents in prop::collection::vec(arb_agent(), 0..12),
    ) {
        let before = ledger::total_available(&account, &agents).unwrap();
        let prior_paid = account.paid_earnings;
        let prior_balance = account.available_balance;

        match ledger::withdraw(&mut account, &mut agents) {
            Ok(receipt) => {
                prop_assert!(!before.is_zero());
                prop_assert_eq!(receipt.amount, before);
                prop_assert_eq!(
                    ledger::total_available(&account, &agents).unwrap(),
                    Amount::ZERO
                );
                prop_assert_eq!(
                    account.paid_earnings,
                    prior_paid.checked_add(prior_balance).unwrap()
                );
            }
            Err(HubError::NoFundsAvailable) => prop_assert!(before.is_zero()),
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn corrupt_agent_is_always_rejected(
        mut agents in prop::collection::vec(arb_agent(), 1..12),
        excess in 1u64..1000,
    ) {
        let victim = agents.len() - 1;
        agents[victim].paid_commission = agents[victim]
            .accrued_commission
            .checked_add(Amount::new(excess))
            .unwrap();
        let rejected = matches!(
            ledger::unpaid_agent_total(&agents),
            Err(HubError::InvariantViolation { .. })
        );
        prop_assert!(rejected);
    }
}
