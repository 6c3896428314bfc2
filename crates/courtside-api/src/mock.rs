//! In-memory portal for testing and offline use.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use courtside_core::codes::TemporaryCode;
use courtside_core::model::AssessmentForm;
use courtside_core::submission::Submission;
use courtside_core::traits::PortalApi;

/// A mock portal backend holding everything in memory.
///
/// Used by end-to-end lifecycle tests that want the full service without
/// a running backend. Upserts forms by code the way the real one does.
#[derive(Default)]
pub struct MockPortal {
    forms: Mutex<Vec<AssessmentForm>>,
    temp_codes: Mutex<Vec<TemporaryCode>>,
    submissions: Mutex<Vec<Submission>>,
    /// Number of calls made across all endpoints.
    call_count: AtomicU32,
    /// When set, every mutating call fails.
    fail_writes: std::sync::atomic::AtomicBool,
}

impl MockPortal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed stored forms.
    pub fn with_forms(forms: Vec<AssessmentForm>) -> Self {
        let portal = Self::default();
        *portal.forms.lock().unwrap() = forms;
        portal
    }

    /// Pre-seed stored temporary codes.
    pub fn seed_temp_codes(&self, codes: Vec<TemporaryCode>) {
        *self.temp_codes.lock().unwrap() = codes;
    }

    /// Make all mutating calls fail, for persistence-error paths.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Number of calls made to this portal.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Current stored submissions, for assertions.
    pub fn stored_submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }

    fn record_call(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }

    fn check_writable(&self) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            anyhow::bail!("portal unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl PortalApi for MockPortal {
    async fn fetch_forms(&self) -> anyhow::Result<Vec<AssessmentForm>> {
        self.record_call();
        Ok(self.forms.lock().unwrap().clone())
    }

    async fn save_form(&self, form: &AssessmentForm) -> anyhow::Result<AssessmentForm> {
        self.record_call();
        self.check_writable()?;
        let mut forms = self.forms.lock().unwrap();
        forms.retain(|f| f.code != form.code);
        forms.push(form.clone());
        Ok(form.clone())
    }

    async fn delete_form(&self, code: &str) -> anyhow::Result<()> {
        self.record_call();
        self.check_writable()?;
        self.forms
            .lock()
            .unwrap()
            .retain(|f| f.code.as_deref() != Some(code));
        Ok(())
    }

    async fn issue_temp_code(&self, temp: &TemporaryCode) -> anyhow::Result<TemporaryCode> {
        self.record_call();
        self.check_writable()?;
        self.temp_codes.lock().unwrap().push(temp.clone());
        Ok(temp.clone())
    }

    async fn fetch_temp_codes(&self) -> anyhow::Result<Vec<TemporaryCode>> {
        self.record_call();
        Ok(self.temp_codes.lock().unwrap().clone())
    }

    async fn delete_temp_code(&self, temp_code: &str) -> anyhow::Result<()> {
        self.record_call();
        self.check_writable()?;
        // Absent codes delete successfully.
        self.temp_codes
            .lock()
            .unwrap()
            .retain(|t| t.temp_code != temp_code);
        Ok(())
    }

    async fn fetch_submissions(&self) -> anyhow::Result<Vec<Submission>> {
        self.record_call();
        Ok(self.submissions.lock().unwrap().clone())
    }

    async fn save_submission(&self, submission: &Submission) -> anyhow::Result<Submission> {
        self.record_call();
        self.check_writable()?;
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(submission.clone())
    }

    async fn clear_submissions(&self) -> anyhow::Result<u64> {
        self.record_call();
        self.check_writable()?;
        let mut subs = self.submissions.lock().unwrap();
        let count = subs.len() as u64;
        subs.clear();
        Ok(count)
    }
}
