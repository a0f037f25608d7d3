use std::time::{Duration, Instant};

use serde::Serialize;

use crate::workflow::SubmissionOutcome;

pub const SUCCESS_MESSAGE: &str = "Financing Request submitted successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to submit request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Success,
    Danger,
}

/// Transient banner shown after a submission finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub variant: NotificationVariant,
    pub message: &'static str,
    #[serde(skip)]
    pub dismiss_after: Duration,
    #[serde(skip)]
    shown_at: Instant,
}

impl Notification {
    pub fn for_outcome(outcome: &SubmissionOutcome, dismiss_after: Duration) -> Self {
        Self::for_outcome_at(outcome, dismiss_after, Instant::now())
    }

    pub fn for_outcome_at(
        outcome: &SubmissionOutcome,
        dismiss_after: Duration,
        shown_at: Instant,
    ) -> Self {
        let (variant, message) = match outcome {
            SubmissionOutcome::Success => (NotificationVariant::Success, SUCCESS_MESSAGE),
            SubmissionOutcome::Failure(_) => (NotificationVariant::Danger, FAILURE_MESSAGE),
        };
        Self {
            variant,
            message,
            dismiss_after,
            shown_at,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.dismiss_after
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reason_is_not_shown_to_the_user() {
        let n = Notification::for_outcome(
            &SubmissionOutcome::Failure("submission rejected status=500".to_string()),
            Duration::from_secs(3),
        );
        assert_eq!(n.variant, NotificationVariant::Danger);
        assert_eq!(n.message, FAILURE_MESSAGE);
    }

    #[test]
    fn auto_dismisses_after_window() {
        let t0 = Instant::now();
        let n = Notification::for_outcome_at(
            &SubmissionOutcome::Success,
            Duration::from_secs(3),
            t0,
        );
        assert_eq!(n.message, SUCCESS_MESSAGE);
        assert!(n.is_visible_at(t0));
        assert!(n.is_visible_at(t0 + Duration::from_millis(2999)));
        assert!(!n.is_visible_at(t0 + Duration::from_secs(3)));
    }

    #[test]
    fn serializes_variant_and_message_only() {
        let n = Notification::for_outcome(&SubmissionOutcome::Success, Duration::from_secs(3));
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(v["variant"], "success");
        assert_eq!(v["message"], SUCCESS_MESSAGE);
        assert_eq!(v.as_object().unwrap().len(), 2);
    }
}
