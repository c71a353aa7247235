//! Account store with an explicit session lifecycle
//!
//! Load-on-start, save-on-mutation, clear-on-logout. Every mutating
//! operation validates its domain rules first and persists before the
//! in-memory state is updated, so a failure leaves both the file and
//! the session unchanged.

#![warn(unreachable_pub)]

pub mod record;

pub use record::{StoredAccount, SCHEMA_VERSION};

use hub_auth::{Credential, CredentialError};
use hub_core::{
    check_password_rules, generate_referral_id, ledger, Account, AccountStats, Agent, HubError,
    Role, WithdrawalReceipt,
};
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Record that cannot be decoded
    #[error("corrupt session record: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Record written by an unknown schema version
    #[error("unsupported schema version {found}, expected {}", SCHEMA_VERSION)]
    UnsupportedSchema {
        /// Version found in the record
        found: u32,
    },

    /// Operation that requires a session when none exists
    #[error("no active session; run setup first")]
    NoSession,

    /// Agent operation on a role that has no agent list
    #[error("role '{0}' does not manage agents")]
    RoleWithoutAgents(Role),

    /// Credential that cannot be checked
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Domain rule failure
    #[error(transparent)]
    Domain(#[from] HubError),
}

/// The account store
///
/// Owns the session record exclusively; all access goes through
/// `&self` methods guarded by an internal lock.
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
    state: Mutex<Option<StoredAccount>>,
}

impl AccountStore {
    /// Open the store, loading any existing session from disk
    ///
    /// An absent file means no session; a present but undecodable or
    /// version-mismatched file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(content) => {
                let record: StoredAccount = serde_json::from_str(&content)?;
                if record.schema_version != SCHEMA_VERSION {
                    return Err(StoreError::UnsupportedSchema {
                        found: record.schema_version,
                    });
                }
                tracing::debug!(user_id = %record.account.user_id, "session loaded");
                Some(record)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Path of the backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a session is loaded
    #[inline]
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Clone of the current session record
    pub fn snapshot(&self) -> Result<StoredAccount, StoreError> {
        self.state.lock().clone().ok_or(StoreError::NoSession)
    }

    /// Start a fresh session for the selected role
    ///
    /// Generates the user identifier, persists an unactivated account,
    /// and replaces any existing session: re-selecting a role restarts
    /// setup.
    pub fn begin_session(&self, role: Role) -> Result<Account, StoreError> {
        let user_id = generate_referral_id();
        let account = Account::new(user_id, role);
        let record = StoredAccount::new(account.clone());
        self.persist(&record)?;
        *self.state.lock() = Some(record);
        tracing::info!(role = %role, user_id = %account.user_id, "session started");
        Ok(account)
    }

    /// Apply backend display stats and seeded agents to a fresh session
    ///
    /// Runs at most once per session; returns `false` (without touching
    /// anything) on later calls, so a periodic refresh can never
    /// clobber live mutations such as a completed withdrawal.
    pub fn seed_stats(
        &self,
        stats: &AccountStats,
        agents: Vec<Agent>,
    ) -> Result<bool, StoreError> {
        {
            let guard = self.state.lock();
            let record = guard.as_ref().ok_or(StoreError::NoSession)?;
            if record.stats_seeded {
                return Ok(false);
            }
        }
        self.with_record(|record| {
            record.account.referral_count = stats.referral_count;
            record.account.valid_referral_count = stats.valid_referral_count;
            record.account.available_balance = stats.total_earnings;
            if record.account.role.manages_agents() {
                record.agents = agents;
            }
            record.stats_seeded = true;
            Ok(true)
        })
    }

    /// Refresh the personal referral counters from backend stats
    ///
    /// Display state only: balances and agent records are never touched
    /// by a refresh tick.
    pub fn refresh_display_stats(&self, stats: &AccountStats) -> Result<(), StoreError> {
        self.with_record(|record| {
            record.account.referral_count = stats.referral_count;
            record.account.valid_referral_count = stats.valid_referral_count;
            Ok(())
        })
    }

    /// Activate the account with a password
    ///
    /// # Errors
    /// `HubError::WeakPassword` (via `StoreError::Domain`) if any
    /// strength rule fails; nothing is persisted in that case.
    pub fn activate(
        &self,
        password: &str,
        backup_email: Option<String>,
    ) -> Result<(), StoreError> {
        let report = check_password_rules(password);
        if !report.all_passed() {
            return Err(HubError::WeakPassword { report }.into());
        }
        self.with_record(|record| {
            record.credential = Some(Credential::derive(password));
            record.account.activated = true;
            record.account.backup_email = backup_email.clone();
            record.activated_at = Some(chrono::Utc::now());
            Ok(())
        })?;
        tracing::info!("account activated");
        Ok(())
    }

    /// Verify a password against the stored credential
    ///
    /// # Errors
    /// `StoreError::NoSession` when the account was never activated.
    pub fn verify_password(&self, password: &str) -> Result<bool, StoreError> {
        let record = self.snapshot()?;
        let credential = record.credential.ok_or(StoreError::NoSession)?;
        Ok(credential.verify(password)?)
    }

    /// Create a new agent with a generated sub-identifier
    ///
    /// Duplicate names are allowed (single-user tool; see design
    /// notes), only logged.
    pub fn add_agent(&self, name: &str) -> Result<Agent, StoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(HubError::EmptyAgentName.into());
        }
        self.with_record(|record| {
            if !record.account.role.manages_agents() {
                return Err(StoreError::RoleWithoutAgents(record.account.role));
            }
            if record.agents.iter().any(|a| a.name == trimmed) {
                tracing::debug!(name = trimmed, "duplicate agent name");
            }
            let agent = Agent::new(trimmed, generate_referral_id());
            record.agents.push(agent.clone());
            Ok(agent)
        })
    }

    /// Withdraw everything outstanding via the ledger engine
    pub fn withdraw(&self) -> Result<WithdrawalReceipt, StoreError> {
        self.with_record(|record| {
            let receipt = ledger::withdraw(&mut record.account, &mut record.agents)?;
            Ok(receipt)
        })
    }

    /// End the session and remove the backing file
    pub fn clear(&self) -> Result<(), StoreError> {
        *self.state.lock() = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Run a mutation on a working copy; persist and commit only on
    /// success
    fn with_record<T>(
        &self,
        f: impl FnOnce(&mut StoredAccount) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.state.lock();
        let record = guard.as_mut().ok_or(StoreError::NoSession)?;
        let mut working = record.clone();
        let out = f(&mut working)?;
        self.persist(&working)?;
        *record = working;
        Ok(out)
    }

    fn persist(&self, record: &StoredAccount) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
