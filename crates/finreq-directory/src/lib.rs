//! finreq-directory
//!
//! Country list source for the financing-request form.
//!
//! The form only ever consumes a `Vec<String>` of display names. This crate
//! owns the directory abstraction, the REST Countries implementation, and an
//! in-memory implementation for offline use and tests.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that a [`CountryDirectory`] implementation may return.
#[derive(Debug)]
pub enum DirectoryError {
    /// Network or transport failure.
    Transport(String),
    /// The upstream API answered with a non-success status.
    Api { status: u16 },
    /// A response payload could not be decoded.
    Decode(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Transport(msg) => write!(f, "transport error: {msg}"),
            DirectoryError::Api { status } => write!(f, "country api error status={status}"),
            DirectoryError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

// ---------------------------------------------------------------------------
// Directory trait
// ---------------------------------------------------------------------------

/// Read-only source of selectable country names.
#[async_trait::async_trait]
pub trait CountryDirectory: Send + Sync {
    /// Human-readable name identifying this source (e.g. `"restcountries"`).
    fn source_name(&self) -> &'static str;

    /// Fetch every country display name, in the order the source returns them.
    async fn fetch_countries(&self) -> Result<Vec<String>, DirectoryError>;
}

/// Fetch the country list once, degrading to an empty list on failure.
///
/// The failure is logged and otherwise swallowed: the form still renders, and
/// with no selectable country the `country` field fails required validation.
pub async fn load_countries_or_empty(directory: &dyn CountryDirectory) -> Vec<String> {
    match directory.fetch_countries().await {
        Ok(names) => {
            debug!(
                source = directory.source_name(),
                count = names.len(),
                "country list loaded"
            );
            names
        }
        Err(err) => {
            warn!(source = directory.source_name(), error = %err, "error fetching countries");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// REST Countries
// ---------------------------------------------------------------------------

/// Directory backed by the public REST Countries API (`/v3.1/all`).
///
/// Each entry's `name.common` is used as the display name.
#[derive(Debug, Clone)]
pub struct RestCountriesDirectory {
    http: reqwest::Client,
    base_url: String,
}

impl Default for RestCountriesDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl RestCountriesDirectory {
    pub fn new() -> Self {
        Self::new_with_base_url("https://restcountries.com".to_string())
    }

    pub fn new_with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn build_all_url(&self) -> String {
        format!("{}/v3.1/all", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct RestCountry {
    name: RestCountryName,
}

#[derive(Debug, Deserialize)]
struct RestCountryName {
    common: String,
}

#[async_trait::async_trait]
impl CountryDirectory for RestCountriesDirectory {
    fn source_name(&self) -> &'static str {
        "restcountries"
    }

    async fn fetch_countries(&self) -> Result<Vec<String>, DirectoryError> {
        let resp = self
            .http
            .get(self.build_all_url())
            // v3.1/all refuses unfiltered requests; only the name is needed.
            .query(&[("fields", "name")])
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DirectoryError::Api {
                status: status.as_u16(),
            });
        }

        let body: Vec<RestCountry> = resp
            .json()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))?;

        Ok(body.into_iter().map(|c| c.name.common).collect())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Fixed list of countries. Never fails.
#[derive(Debug, Clone, Default)]
pub struct StaticCountryDirectory {
    names: Vec<String>,
}

impl StaticCountryDirectory {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl CountryDirectory for StaticCountryDirectory {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn fetch_countries(&self) -> Result<Vec<String>, DirectoryError> {
        Ok(self.names.clone())
    }
}

// -----------------
// Tests (no network)
// -----------------
