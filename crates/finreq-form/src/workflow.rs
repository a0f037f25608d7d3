//! Submission workflow.
//!
//! # State diagram
//!
//! ```text
//!            submit (valid, flag acquired)
//!    Idle ─────────────────────────────────► Submitting
//!     ▲                                          │
//!     └──────────── request finished ────────────┘
//!                 (success, failure, timeout,
//!                  panic or dropped future)
//! ```
//!
//! An invalid draft never leaves `Idle` and never reaches the submitter. A
//! trigger while `Submitting` is refused without a second request. The busy
//! flag is released by a drop guard, so no exit path can leave the workflow
//! stuck in `Submitting`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use finreq_config::FormConfig;
use finreq_rules::{validate, ValidationErrors};
use finreq_schemas::FinancingRequestDraft;
use tracing::{info, warn};
use uuid::Uuid;

use crate::submitter::{HttpSubmitter, SubmitError, Submitter};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    /// One request is in flight; the submit control is disabled.
    Submitting,
}

/// Terminal result of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    /// Human-readable reason, for logs; the user sees a generic message.
    Failure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }
}

/// What a single submit trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// A request was already in flight; nothing was sent.
    AlreadySubmitting,
    /// Exactly one request was sent and has finished.
    Completed {
        submission_id: Uuid,
        outcome: SubmissionOutcome,
    },
}

impl SubmitAttempt {
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            SubmitAttempt::Completed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            SubmitAttempt::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Busy guard
// ---------------------------------------------------------------------------

/// Holds the busy flag for the lifetime of one request.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ---------------------------------------------------------------------------
// SubmissionWorkflow
// ---------------------------------------------------------------------------

pub struct SubmissionWorkflow {
    submitter: Arc<dyn Submitter>,
    busy: AtomicBool,
    timeout: Option<Duration>,
}

impl SubmissionWorkflow {
    /// Workflow without a timeout: a silent endpoint keeps it `Submitting`.
    pub fn new(submitter: Arc<dyn Submitter>) -> Self {
        Self {
            submitter,
            busy: AtomicBool::new(false),
            timeout: None,
        }
    }

    /// Fail the request with [`SubmitError::Timeout`] after `limit`.
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// HTTP workflow posting to the configured endpoint.
    pub fn from_config(cfg: &FormConfig) -> Self {
        let submitter = HttpSubmitter::new(cfg.submission_url());
        Self::new(Arc::new(submitter)).with_timeout(cfg.submit_timeout())
    }

    pub fn state(&self) -> WorkflowState {
        if self.busy.load(Ordering::Acquire) {
            WorkflowState::Submitting
        } else {
            WorkflowState::Idle
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == WorkflowState::Submitting
    }

    /// Validate `draft` as of `today` and, if valid, send it once.
    pub async fn submit(&self, draft: &FinancingRequestDraft, today: NaiveDate) -> SubmitAttempt {
        if self.is_submitting() {
            return SubmitAttempt::AlreadySubmitting;
        }

        let errors = validate(draft, today);
        if !errors.is_empty() {
            info!(invalid_fields = errors.len(), "submit blocked by validation");
            return SubmitAttempt::Invalid(errors);
        }

        // Re-checked atomically: two triggers may both pass the fast path above.
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            return SubmitAttempt::AlreadySubmitting;
        };

        let submission_id = Uuid::new_v4();
        info!(%submission_id, country = %draft.country, "submitting financing request");

        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.submitter.submit(draft))
                .await
                .unwrap_or(Err(SubmitError::Timeout(limit))),
            None => self.submitter.submit(draft).await,
        };

        let outcome = match result {
            Ok(()) => {
                info!(%submission_id, "financing request accepted");
                SubmissionOutcome::Success
            }
            Err(err) => {
                warn!(%submission_id, error = %err, "financing request failed");
                SubmissionOutcome::Failure(err.to_string())
            }
        };

        SubmitAttempt::Completed {
            submission_id,
            outcome,
        }
    }
}
