//! Outbound submission boundary.

use std::fmt;
use std::time::Duration;

use finreq_schemas::FinancingRequestDraft;

/// Why a submission did not succeed.
///
/// The form reports every variant the same way (one generic failure banner);
/// the distinction only reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Network or transport failure (refused, reset, DNS, TLS, ...).
    Transport(String),
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// No answer within the configured submit timeout.
    Timeout(Duration),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Transport(msg) => write!(f, "transport error: {msg}"),
            SubmitError::Status(code) => write!(f, "submission rejected status={code}"),
            SubmitError::Timeout(after) => {
                write!(f, "submission timed out after {}ms", after.as_millis())
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// Sends one complete draft to the backend.
///
/// One call is one request: implementations must not retry.
#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, draft: &FinancingRequestDraft) -> Result<(), SubmitError>;
}

/// Posts the draft as camelCase JSON to a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    http: reqwest::Client,
    url: String,
}

impl HttpSubmitter {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, draft: &FinancingRequestDraft) -> Result<(), SubmitError> {
        let resp = self
            .http
            .post(&self.url)
            .json(draft)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            SubmitError::Status(422).to_string(),
            "submission rejected status=422"
        );
        assert_eq!(
            SubmitError::Timeout(Duration::from_millis(1500)).to_string(),
            "submission timed out after 1500ms"
        );
    }

    #[test]
    fn submitter_is_object_safe_via_box() {
        let _s: Box<dyn Submitter> = Box::new(HttpSubmitter::new("http://127.0.0.1:9/api/requests"));
    }
}
