//! Session lifecycle integration tests
//!
//! Exercise load-on-start, save-on-mutation, and clear-on-logout
//! against a real file, including reopening the store between steps.

use hub_core::{Amount, Agent, AgentStatus, HubError, Role};
use hub_store::{AccountStore, StoreError, SCHEMA_VERSION};

fn seeded_agents() -> Vec<Agent> {
    vec![
        Agent::new("Ella Amadi", "sub000000001")
            .with_referrals(15, 10)
            .with_commission(Amount::new(5000), Amount::new(5000)),
        Agent::new("Shoozy B", "sub000000002")
            .with_referrals(35, 8)
            .with_commission(Amount::new(4000), Amount::ZERO),
        Agent::new("Victor PoS", "sub000000003")
            .with_referrals(4, 2)
            .with_commission(Amount::new(1000), Amount::ZERO),
    ]
}

fn field_agent_stats() -> hub_core::AccountStats {
    hub_core::AccountStats {
        referral_count: 100,
        valid_referral_count: 85,
        total_earnings: Amount::new(42500),
        agent_count: Some(8),
        active_agent_count: Some(6),
    }
}

#[test]
fn full_session_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    // Setup: select role, generate id, persist.
    let store = AccountStore::open(&path).unwrap();
    let account = store.begin_session(Role::FieldAgent).unwrap();
    assert_eq!(account.user_id.len(), hub_core::REFERRAL_ID_LEN);
    assert!(path.exists());

    // Reopen: load-on-start finds the session.
    let store = AccountStore::open(&path).unwrap();
    assert!(store.has_session());
    assert_eq!(store.snapshot().unwrap().account.user_id, account.user_id);

    // Activation: weak password first, then a compliant one.
    let err = store.activate("abc", None).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Domain(HubError::WeakPassword { .. })
    ));
    assert!(!store.snapshot().unwrap().account.activated);

    store
        .activate("Str0ngPass", Some("backup@example.com".to_string()))
        .unwrap();
    let record = store.snapshot().unwrap();
    assert!(record.account.activated);
    assert!(record.activated_at.is_some());
    assert!(store.verify_password("Str0ngPass").unwrap());
    assert!(!store.verify_password("WrongPass1").unwrap());
    // The password itself is never written to disk.
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("Str0ngPass"));

    // Seed the mock dashboard figures, then withdraw everything.
    store.seed_stats(&field_agent_stats(), seeded_agents()).unwrap();
    let receipt = store.withdraw().unwrap();
    assert_eq!(receipt.amount, Amount::new(47500));
    assert_eq!(receipt.personal, Amount::new(42500));
    assert_eq!(receipt.from_agents, Amount::new(5000));

    // Reopen once more: the settled state survived.
    let store = AccountStore::open(&path).unwrap();
    let record = store.snapshot().unwrap();
    assert_eq!(record.account.available_balance, Amount::ZERO);
    assert_eq!(record.account.paid_earnings, Amount::new(42500));
    for agent in &record.agents {
        assert_eq!(agent.status(), AgentStatus::Paid);
    }

    // A second withdrawal finds nothing outstanding.
    assert!(matches!(
        store.withdraw(),
        Err(StoreError::Domain(HubError::NoFundsAvailable))
    ));

    // Logout.
    store.clear().unwrap();
    assert!(!store.has_session());
    assert!(!path.exists());
    let store = AccountStore::open(&path).unwrap();
    assert!(!store.has_session());
}

#[test]
fn agents_added_live_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = AccountStore::open(&path).unwrap();
    store.begin_session(Role::FieldAgent).unwrap();
    let agent = store.add_agent("New Vendor").unwrap();

    let store = AccountStore::open(&path).unwrap();
    let record = store.snapshot().unwrap();
    assert_eq!(record.agents.len(), 1);
    assert_eq!(record.agents[0].sub_id, agent.sub_id);
    assert_eq!(record.agents[0].status(), AgentStatus::Pending);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = AccountStore::open(&path).unwrap();
    store.begin_session(Role::Ambassador).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let bumped = raw.replace(
        &format!("\"schema_version\": {SCHEMA_VERSION}"),
        "\"schema_version\": 99",
    );
    assert_ne!(raw, bumped);
    std::fs::write(&path, bumped).unwrap();

    let err = AccountStore::open(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::UnsupportedSchema { found: 99 }
    ));
}

#[test]
fn corrupt_file_is_an_error_not_a_fresh_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(
        AccountStore::open(&path),
        Err(StoreError::Corrupt(_))
    ));
}
