//! Hub configuration

use serde::{Deserialize, Serialize};

/// Default base URL for composed referral links (query-free store
/// listing, so composition appends exactly one id pair)
pub const DEFAULT_BASE_URL: &str = "https://play.google.com/store/apps/details";

/// Default dashboard refresh interval in seconds
pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Base URL referral links are composed against
    pub base_url: String,
    /// Dashboard stats refresh interval in seconds
    pub refresh_secs: u64,
    /// Currency symbol used for display
    pub currency_symbol: String,
}

impl HubConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With refresh interval
    #[inline]
    #[must_use]
    pub fn with_refresh_secs(mut self, secs: u64) -> Self {
        self.refresh_secs = secs;
        self
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_secs: DEFAULT_REFRESH_SECS,
            currency_symbol: "₦".to_string(),
        }
    }
}
