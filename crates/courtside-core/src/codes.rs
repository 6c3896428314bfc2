//! Form access codes: permanent identifiers and 24-hour temporary codes.
//!
//! The expiry rule lives here and nowhere else: expiry is a predicate over
//! a passed-in `now`, evaluated lazily at resolve/list time. There is no
//! background sweep and no transition back to valid.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::model::AssessmentForm;

/// Fixed distinguishing prefix carried by every temporary code.
pub const TEMP_CODE_PREFIX: &str = "TMP-";

/// Fixed TTL for temporary codes.
pub fn temp_code_ttl() -> Duration {
    Duration::hours(24)
}

/// Generate a short permanent form code: uppercase 6-char uuid slice.
///
/// Assigned once at first successful save and stable for the form's
/// lifetime. Collisions are left to the persistence layer to reject.
pub fn generate_form_code() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_uppercase()
}

/// A short-lived access code bound to one published form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryCode {
    /// The code itself, carrying [`TEMP_CODE_PREFIX`].
    pub temp_code: String,
    /// Permanent code of the parent form.
    pub parent_form_code: String,
    /// Title copied from the parent at issuance, for display after the
    /// parent may have changed or been deleted.
    pub parent_form_title: String,
    /// Time limit copied from the parent at issuance.
    pub time_limit_minutes: u32,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TemporaryCode {
    /// Mint a temporary code for a published, active form.
    ///
    /// Fails with a state error for drafts and disabled forms. The minted
    /// code is regenerated until it collides with none of `existing`.
    pub fn issue(
        form: &AssessmentForm,
        existing: &[TemporaryCode],
        now: DateTime<Utc>,
    ) -> Result<TemporaryCode, AssessmentError> {
        if form.is_draft {
            return Err(AssessmentError::State(
                "cannot issue a temporary code for a draft form".into(),
            ));
        }
        if !form.active {
            return Err(AssessmentError::State(
                "cannot issue a temporary code for a disabled form".into(),
            ));
        }
        let parent_code = form.code.clone().ok_or_else(|| {
            AssessmentError::State("form has no permanent code; save it first".into())
        })?;

        let mut code = random_temp_code();
        while existing.iter().any(|t| t.temp_code == code) {
            code = random_temp_code();
        }

        Ok(TemporaryCode {
            temp_code: code,
            parent_form_code: parent_code,
            parent_form_title: form.title.clone(),
            time_limit_minutes: form.time_limit_minutes,
            issued_at: now,
            expires_at: now + temp_code_ttl(),
        })
    }

    /// Past the TTL. Valid up to and including `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

fn random_temp_code() -> String {
    let tail = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("{TEMP_CODE_PREFIX}{tail}")
}

/// Drop expired entries. Callers never filter by `expires_at` themselves.
pub fn filter_active(codes: Vec<TemporaryCode>, now: DateTime<Utc>) -> Vec<TemporaryCode> {
    codes.into_iter().filter(|c| !c.is_expired(now)).collect()
}

/// Resolve an entry code — permanent or temporary — to its form.
///
/// This is the single gate a participant-facing flow calls before starting
/// a timed attempt. Temporary codes resolve through their parent and fail
/// once expired; a disabled parent does not invalidate a live temporary
/// code (the submission recorder re-checks `active` on its own). Permanent
/// codes only resolve to published forms: drafts are outside the public
/// directory.
pub fn resolve_code<'a>(
    code: &str,
    forms: &'a [AssessmentForm],
    temp_codes: &[TemporaryCode],
    now: DateTime<Utc>,
) -> Result<&'a AssessmentForm, AssessmentError> {
    let code = code.trim();

    if code.starts_with(TEMP_CODE_PREFIX) {
        let temp = temp_codes
            .iter()
            .find(|t| t.temp_code == code)
            .ok_or_else(|| AssessmentError::State(format!("unknown temporary code {code}")))?;
        if temp.is_expired(now) {
            return Err(AssessmentError::Expired {
                code: temp.temp_code.clone(),
                expired_at: temp.expires_at,
            });
        }
        return forms
            .iter()
            .find(|f| f.code.as_deref() == Some(temp.parent_form_code.as_str()))
            .ok_or_else(|| {
                AssessmentError::State(format!(
                    "parent form {} no longer exists",
                    temp.parent_form_code
                ))
            });
    }

    forms
        .iter()
        .find(|f| f.code.as_deref() == Some(code) && !f.is_draft)
        .ok_or_else(|| AssessmentError::State(format!("no published form with code {code}")))
}
