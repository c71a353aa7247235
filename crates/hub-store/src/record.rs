//! Persisted session record
//!
//! One explicit, versioned JSON record rather than loose string
//! key-value fields. Loading a record with an unknown schema version
//! fails instead of guessing.

use chrono::{DateTime, Utc};
use hub_auth::Credential;
use hub_core::{Account, Agent};
use serde::{Deserialize, Serialize};

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// The on-disk session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAccount {
    /// Record format version
    pub schema_version: u32,
    /// The signed-in account
    pub account: Account,
    /// Salted password hash, present once activated
    pub credential: Option<Credential>,
    /// Referred sub-agents (field agents only)
    pub agents: Vec<Agent>,
    /// Whether backend display stats were applied to this session
    pub stats_seeded: bool,
    /// Session creation time
    pub created_at: DateTime<Utc>,
    /// Activation time, once a password is set
    pub activated_at: Option<DateTime<Utc>>,
}

impl StoredAccount {
    /// Create a fresh record for a new session
    #[inline]
    #[must_use]
    pub fn new(account: Account) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            account,
            credential: None,
            agents: Vec::new(),
            stats_seeded: false,
            created_at: Utc::now(),
            activated_at: None,
        }
    }
}
