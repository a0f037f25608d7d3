//! Typed configuration consumed by the form runtime.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Overrides `countries.base_url` when set.
pub const ENV_COUNTRIES_URL: &str = "FINREQ_COUNTRIES_URL";
/// Overrides `submission.base_url` when set.
pub const ENV_SUBMIT_URL: &str = "FINREQ_SUBMIT_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountriesConfig {
    pub base_url: String,
}

impl Default for CountriesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://restcountries.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmissionConfig {
    pub base_url: String,
    pub path: String,
    /// `None` waits on the endpoint indefinitely.
    pub timeout_ms: Option<u64>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            path: "/api/requests".to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    pub dismiss_after_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3_000,
        }
    }
}

/// Everything the form runtime reads from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub countries: CountriesConfig,
    pub submission: SubmissionConfig,
    pub notification: NotificationConfig,
}

impl FormConfig {
    /// Compact JSON of the effective settings, in declaration order.
    ///
    /// Source key order and omitted defaults do not show here, so two layer
    /// sets that configure the same form serialize identically.
    pub fn canonical_json(&self) -> Result<String> {
        serde_json::to_string(self).context("config serialize failed")
    }

    /// Hex SHA-256 of [`FormConfig::canonical_json`].
    pub fn config_hash(&self) -> Result<String> {
        let digest = Sha256::digest(self.canonical_json()?.as_bytes());
        Ok(hex::encode(digest))
    }

    /// Full URL the draft is posted to.
    pub fn submission_url(&self) -> String {
        let base = self.submission.base_url.trim_end_matches('/');
        let path = self.submission.path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub fn submit_timeout(&self) -> Option<Duration> {
        self.submission.timeout_ms.map(Duration::from_millis)
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.notification.dismiss_after_ms)
    }

    /// Apply [`ENV_COUNTRIES_URL`] / [`ENV_SUBMIT_URL`] from the process env.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|k| std::env::var(k).ok());
    }

    /// Apply URL overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(ENV_COUNTRIES_URL) {
            self.countries.base_url = url;
        }
        if let Some(url) = non_empty(ENV_SUBMIT_URL) {
            self.submission.base_url = url;
        }
    }
}
