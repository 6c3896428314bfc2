//! The persistence collaborator boundary.
//!
//! Every form, temporary code, and submission lives behind this trait; the
//! `courtside-api` crate implements it over HTTP and as an in-memory mock.
//! The contract is success-or-error with no retry semantics — retrying is
//! always a deliberate operator action at the calling layer.

use async_trait::async_trait;

use crate::codes::TemporaryCode;
use crate::model::AssessmentForm;
use crate::submission::Submission;

/// The portal backend's persistence API.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// All forms, drafts included.
    async fn fetch_forms(&self) -> anyhow::Result<Vec<AssessmentForm>>;

    /// Create-or-update by presence of `code`; returns the server-confirmed
    /// record.
    async fn save_form(&self, form: &AssessmentForm) -> anyhow::Result<AssessmentForm>;

    /// Hard removal. Submissions already recorded are retained server-side.
    async fn delete_form(&self, code: &str) -> anyhow::Result<()>;

    /// Persist a freshly minted temporary code.
    async fn issue_temp_code(&self, temp: &TemporaryCode) -> anyhow::Result<TemporaryCode>;

    /// All stored temporary codes, expired entries included; expiry
    /// filtering is the engine's job.
    async fn fetch_temp_codes(&self) -> anyhow::Result<Vec<TemporaryCode>>;

    /// Idempotent: deleting an absent code succeeds.
    async fn delete_temp_code(&self, temp_code: &str) -> anyhow::Result<()>;

    async fn fetch_submissions(&self) -> anyhow::Result<Vec<Submission>>;

    async fn save_submission(&self, submission: &Submission) -> anyhow::Result<Submission>;

    /// Bulk delete; returns the number removed.
    async fn clear_submissions(&self) -> anyhow::Result<u64>;
}
