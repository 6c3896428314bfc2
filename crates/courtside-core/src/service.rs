//! The assessment lifecycle service.
//!
//! One object owns the rules that span the data model and the persistence
//! collaborator: draft → save → publish → share → submit → aggregate.
//! Operations run one at a time, request/response; the service never
//! retries a failed collaborator call and never trusts an optimistic local
//! copy — callers re-fetch after mutations.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::batch::{build_batches, Batch};
use crate::codes::{self, TemporaryCode};
use crate::error::AssessmentError;
use crate::model::{AssessmentForm, Question};
use crate::submission::{ParticipantInfo, Submission};
use crate::traits::PortalApi;

/// Lifecycle orchestrator over the portal collaborator.
pub struct AssessmentService {
    portal: Arc<dyn PortalApi>,
}

impl AssessmentService {
    pub fn new(portal: Arc<dyn PortalApi>) -> Self {
        Self { portal }
    }

    /// New unsaved draft. No code until the first successful save.
    pub fn create_draft(&self, title: impl Into<String>) -> AssessmentForm {
        AssessmentForm::draft(title)
    }

    /// Append a question to a form, rejecting invalid ones with every
    /// missing field named.
    pub fn add_question(
        &self,
        form: &mut AssessmentForm,
        question: Question,
    ) -> Result<(), AssessmentError> {
        let issues = question.validate();
        if !issues.is_empty() {
            return Err(AssessmentError::Validation { issues });
        }
        if form.question(&question.id).is_some() {
            return Err(AssessmentError::validation(format!(
                "question id {} already on form",
                question.id
            )));
        }
        form.questions.push(question);
        Ok(())
    }

    /// Persist the form, assigning a permanent code on first save.
    ///
    /// Fire-once: a collaborator failure surfaces directly and a second
    /// save of a still-codeless copy mints a fresh code. No idempotency
    /// token exists, matching the portal's explicit Save action model.
    pub async fn save(&self, mut form: AssessmentForm) -> Result<AssessmentForm, AssessmentError> {
        if form.title.trim().is_empty() {
            return Err(AssessmentError::validation("title is empty"));
        }
        if form.code.is_none() {
            form.code = Some(codes::generate_form_code());
        }
        self.persist(form).await
    }

    /// Publish: validate everything, clear the draft flag, persist.
    ///
    /// A validation failure carries every invalid question's issues and
    /// leaves the stored form untouched.
    pub async fn publish(
        &self,
        mut form: AssessmentForm,
    ) -> Result<AssessmentForm, AssessmentError> {
        let issues = form.publish_issues();
        if !issues.is_empty() {
            return Err(AssessmentError::Validation { issues });
        }
        if form.code.is_none() {
            form.code = Some(codes::generate_form_code());
        }
        form.is_draft = false;
        self.persist(form).await
    }

    /// Toggle availability without touching questions. Already-issued
    /// temporary codes stay valid when a form is disabled.
    pub async fn set_active(
        &self,
        mut form: AssessmentForm,
        active: bool,
    ) -> Result<AssessmentForm, AssessmentError> {
        form.active = active;
        self.persist(form).await
    }

    /// Hard delete. Recorded submissions are retained; their batches show
    /// the bare code once the parent's title is gone.
    pub async fn delete(&self, form: &AssessmentForm) -> Result<(), AssessmentError> {
        let code = form
            .code
            .as_deref()
            .ok_or_else(|| AssessmentError::State("form was never saved".into()))?;
        self.portal
            .delete_form(code)
            .await
            .map_err(persistence_err)
    }

    /// Mint a 24-hour temporary code for a published, active form.
    pub async fn issue_temporary_code(
        &self,
        form: &AssessmentForm,
    ) -> Result<TemporaryCode, AssessmentError> {
        let now = Utc::now();
        let existing = codes::filter_active(
            self.portal
                .fetch_temp_codes()
                .await
                .map_err(persistence_err)?,
            now,
        );
        let temp = TemporaryCode::issue(form, &existing, now)?;
        tracing::info!(code = %temp.temp_code, parent = %temp.parent_form_code, "issued temporary code");
        self.portal
            .issue_temp_code(&temp)
            .await
            .map_err(persistence_err)
    }

    /// Resolve a permanent or temporary entry code to its form. The one
    /// gate called before a participant starts a timed attempt.
    pub async fn resolve_code(&self, code: &str) -> Result<AssessmentForm, AssessmentError> {
        self.resolve_code_at(code, Utc::now()).await
    }

    /// [`Self::resolve_code`] with an explicit `now`, for expiry tests.
    pub async fn resolve_code_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<AssessmentForm, AssessmentError> {
        let forms = self.portal.fetch_forms().await.map_err(persistence_err)?;
        let temps = self
            .portal
            .fetch_temp_codes()
            .await
            .map_err(persistence_err)?;
        codes::resolve_code(code, &forms, &temps, now).cloned()
    }

    /// Operator removal; succeeds even when the code is already gone.
    pub async fn delete_temporary_code(&self, temp_code: &str) -> Result<(), AssessmentError> {
        self.portal
            .delete_temp_code(temp_code)
            .await
            .map_err(persistence_err)
    }

    /// Currently valid temporary codes. Expired entries are absent here;
    /// callers never check `expires_at` themselves.
    pub async fn list_active_temporary_codes(
        &self,
    ) -> Result<Vec<TemporaryCode>, AssessmentError> {
        let all = self
            .portal
            .fetch_temp_codes()
            .await
            .map_err(persistence_err)?;
        Ok(codes::filter_active(all, Utc::now()))
    }

    /// Score and record one completed attempt.
    ///
    /// The caller resolved the entry code when the attempt started; only
    /// `active` is re-checked here, so a temporary code expiring
    /// mid-attempt does not void the submission (accept-at-start policy).
    /// Pass/fail is fixed from the form's threshold in effect right now.
    pub async fn record_submission(
        &self,
        form: &AssessmentForm,
        participant: &ParticipantInfo,
        answers: BTreeMap<String, String>,
        time_spent_seconds: u64,
    ) -> Result<Submission, AssessmentError> {
        let completed_at = Local::now().fixed_offset();
        let submission = Submission::build(
            form,
            participant,
            answers,
            time_spent_seconds,
            completed_at,
        )?;
        tracing::info!(
            form = %submission.form_code,
            score = submission.score,
            passed = submission.passed,
            "recorded submission"
        );
        self.portal
            .save_submission(&submission)
            .await
            .map_err(persistence_err)
    }

    /// Recompute daily batches from the stored submission set.
    pub async fn batches(
        &self,
        from_date: Option<NaiveDate>,
    ) -> Result<Vec<Batch>, AssessmentError> {
        let submissions = self
            .portal
            .fetch_submissions()
            .await
            .map_err(persistence_err)?;
        let titles: HashMap<String, String> = self
            .portal
            .fetch_forms()
            .await
            .map_err(persistence_err)?
            .into_iter()
            .filter_map(|f| f.code.map(|c| (c, f.title)))
            .collect();
        Ok(build_batches(&submissions, &titles, from_date))
    }

    /// All stored forms.
    pub async fn forms(&self) -> Result<Vec<AssessmentForm>, AssessmentError> {
        self.portal.fetch_forms().await.map_err(persistence_err)
    }

    /// All stored submissions.
    pub async fn submissions(&self) -> Result<Vec<Submission>, AssessmentError> {
        self.portal
            .fetch_submissions()
            .await
            .map_err(persistence_err)
    }

    /// Bulk delete of every submission; returns the count removed.
    pub async fn clear_submissions(&self) -> Result<u64, AssessmentError> {
        let count = self
            .portal
            .clear_submissions()
            .await
            .map_err(persistence_err)?;
        tracing::warn!(count, "cleared all submissions");
        Ok(count)
    }

    async fn persist(&self, form: AssessmentForm) -> Result<AssessmentForm, AssessmentError> {
        match self.portal.save_form(&form).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                tracing::error!(code = ?form.code, "save failed: {e:#}");
                Err(persistence_err(e))
            }
        }
    }
}

fn persistence_err(e: anyhow::Error) -> AssessmentError {
    AssessmentError::Persistence(format!("{e:#}"))
}
