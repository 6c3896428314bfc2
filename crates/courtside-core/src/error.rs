//! Lifecycle error types.
//!
//! Defined in `courtside-core` so callers can match on the failure class
//! (bad input vs. wrong lifecycle state vs. expired code vs. collaborator
//! failure) without string matching. None of these trigger automatic
//! retries; retry is always a deliberate operator action.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by the assessment lifecycle engine.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// Malformed or incomplete input. Carries every issue found, not just
    /// the first, so operators can fix a form in one pass.
    #[error("validation failed: {}", issues.join("; "))]
    Validation { issues: Vec<String> },

    /// Operation attempted against a form or code in the wrong lifecycle
    /// state (draft, disabled, already deleted).
    #[error("invalid state: {0}")]
    State(String),

    /// A temporary access code past its 24-hour TTL.
    #[error("temporary code {code} expired at {expired_at}")]
    Expired {
        code: String,
        expired_at: DateTime<Utc>,
    },

    /// The persistence collaborator call failed or returned non-success.
    #[error("persistence call failed: {0}")]
    Persistence(String),
}

impl AssessmentError {
    /// Shorthand for a single-issue validation failure.
    pub fn validation(issue: impl Into<String>) -> Self {
        AssessmentError::Validation {
            issues: vec![issue.into()],
        }
    }

    /// Returns `true` if the failure came from the remote collaborator
    /// rather than from the engine's own rules.
    pub fn is_persistence(&self) -> bool {
        matches!(self, AssessmentError::Persistence(_))
    }

    /// Returns `true` for failures the operator can fix by editing input.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            AssessmentError::Validation { .. } | AssessmentError::State(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_lists_all_issues() {
        let err = AssessmentError::Validation {
            issues: vec!["question 1: prompt is empty".into(), "question 3: no options".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("question 1"));
        assert!(msg.contains("question 3"));
    }

    #[test]
    fn classification_helpers() {
        assert!(AssessmentError::validation("x").is_user_fixable());
        assert!(AssessmentError::State("draft".into()).is_user_fixable());
        assert!(AssessmentError::Persistence("timeout".into()).is_persistence());
        assert!(!AssessmentError::Persistence("timeout".into()).is_user_fixable());
    }
}
