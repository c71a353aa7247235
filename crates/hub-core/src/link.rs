//! Referral link generation and composition
//!
//! The URL format is a stable external contract: a store-listing
//! consumer attributes installs by reading exactly one role-specific
//! id pair from the query string.

use crate::error::HubError;
use crate::types::Role;
use uuid::Uuid;

/// Length of a generated referral identifier, in hex characters
pub const REFERRAL_ID_LEN: usize = 12;

/// Generate an opaque referral identifier
///
/// Twelve lowercase hex characters taken from a v4 UUID, so 48 bits of
/// entropy: effectively unique within a single account's agent list.
/// Collisions are not detected.
#[must_use]
pub fn generate_referral_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(REFERRAL_ID_LEN);
    id
}

/// Compose a referral URL
///
/// `base_url + "?" + {fa_id|v_id} + "=" + user_id [+ "_" + sub_id]`.
/// Pure and deterministic; `base_url` must carry no query string of its
/// own.
#[must_use]
pub fn build_referral_link(
    base_url: &str,
    role: Role,
    user_id: &str,
    sub_id: Option<&str>,
) -> String {
    match sub_id {
        Some(sub) => format!("{base_url}?{}={user_id}_{sub}", role.param_name()),
        None => format!("{base_url}?{}={user_id}", role.param_name()),
    }
}

/// Parsed form of a referral URL
///
/// Normative definition of what the store-listing consumer extracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralLink {
    /// Role implied by the query parameter name
    pub role: Role,
    /// Owning user's identifier
    pub user_id: String,
    /// Sub-agent identifier, when the link belongs to a managed agent
    pub sub_id: Option<String>,
}

impl ReferralLink {
    /// Compose this link against a base URL
    #[inline]
    #[must_use]
    pub fn compose(&self, base_url: &str) -> String {
        build_referral_link(base_url, self.role, &self.user_id, self.sub_id.as_deref())
    }

    /// Parse a referral URL
    ///
    /// # Errors
    /// `HubError::MalformedLink` if the query string does not contain
    /// exactly one recognized id pair.
    pub fn parse(url: &str) -> Result<Self, HubError> {
        let (_, query) = url
            .split_once('?')
            .ok_or_else(|| HubError::MalformedLink("missing query string".to_string()))?;
        let (name, value) = query
            .split_once('=')
            .ok_or_else(|| HubError::MalformedLink("missing id pair".to_string()))?;
        if value.is_empty() || value.contains('&') {
            return Err(HubError::MalformedLink(
                "expected exactly one id pair".to_string(),
            ));
        }
        let role = match name {
            "fa_id" => Role::FieldAgent,
            "v_id" => Role::Ambassador,
            other => {
                return Err(HubError::MalformedLink(format!(
                    "unrecognized parameter '{other}'"
                )))
            }
        };
        // Generated ids are hex-only, so the first underscore is the
        // user/sub separator.
        let (user_id, sub_id) = match value.split_once('_') {
            Some((user, sub)) => (user.to_string(), Some(sub.to_string())),
            None => (value.to_string(), None),
        };
        Ok(Self {
            role,
            user_id,
            sub_id,
        })
    }
}
