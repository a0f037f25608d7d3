//! finreq-form
//!
//! Runtime side of the financing-request form:
//! - [`Submitter`]: the outbound request boundary, with an HTTP implementation
//! - [`SubmissionWorkflow`]: `Idle -> Submitting -> Idle` with a guaranteed
//!   release of the busy flag
//! - [`Notification`]: the transient success / failure banner
//! - [`bind_input`]: typed binding of input text into a draft
//! - [`FormSession`]: draft binding, touched tracking and the OPEC currency
//!   rule applied after every mutation
//!
//! Decision logic (validation, OPEC membership, symbols) lives in
//! `finreq-rules`; this crate only sequences it.

mod error;
mod input;
mod notification;
mod session;
mod submitter;
mod workflow;

pub use error::FieldInputError;
pub use input::{bind_input, parse_amount};
pub use notification::{
    Notification, NotificationVariant, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use session::FormSession;
pub use submitter::{HttpSubmitter, SubmitError, Submitter};
pub use workflow::{SubmissionOutcome, SubmissionWorkflow, SubmitAttempt, WorkflowState};
