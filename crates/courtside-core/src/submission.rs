//! Participant submissions and answer scoring.
//!
//! Scoring reads the form as currently stored; no snapshot is taken when a
//! participant starts an attempt, so an edit mid-attempt changes the total
//! used at scoring time. Known hazard, kept as observed behavior.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::model::{normalize_text, AssessmentForm};

/// Who took the assessment, for report display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub name: String,
    /// Identity number or similar free-text identifier.
    pub identifier: String,
}

/// Outcome of scoring one answer set against a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub correct_answers: u32,
    pub total_questions: u32,
    /// `round(100 * correct / total)`.
    pub score: u32,
}

/// Score a map of question id → selected option text against the form.
///
/// Comparison is normalized (trimmed, case-folded); unanswered questions
/// count as incorrect. Deterministic: same form and answers, same summary.
pub fn score_answers(form: &AssessmentForm, answers: &BTreeMap<String, String>) -> ScoreSummary {
    let total = form.questions.len() as u32;
    let correct = form
        .questions
        .iter()
        .filter(|q| {
            answers
                .get(&q.id)
                .is_some_and(|selected| q.is_correct(selected))
        })
        .count() as u32;

    let score = if total == 0 {
        0
    } else {
        (100.0 * f64::from(correct) / f64::from(total)).round() as u32
    };

    ScoreSummary {
        correct_answers: correct,
        total_questions: total,
        score,
    }
}

/// One participant's completed, scored attempt. Immutable after creation
/// except for operator bulk deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: Uuid,
    /// Permanent code of the form taken (temporary codes resolve to their
    /// parent before recording).
    pub form_code: String,
    pub participant_name: String,
    pub participant_identifier: String,
    /// Question id → selected option text. Missing entries were unanswered.
    pub answers: BTreeMap<String, String>,
    pub correct_answers: u32,
    pub total_questions: u32,
    /// Derived, never independently settable.
    pub score: u32,
    /// Fixed at creation from the form's threshold in effect at that
    /// moment; never recomputed if the threshold later changes.
    pub passed: bool,
    pub time_spent_seconds: u64,
    /// Carries the local offset of completion so calendar-day grouping
    /// never drifts through UTC.
    pub completed_at: DateTime<FixedOffset>,
}

impl Submission {
    /// Validate, score, and assemble a submission for an active form.
    ///
    /// State error if the form is disabled; validation error for missing
    /// participant fields or answers naming a question the form does not
    /// have. Persistence is the service's concern.
    pub fn build(
        form: &AssessmentForm,
        participant: &ParticipantInfo,
        answers: BTreeMap<String, String>,
        time_spent_seconds: u64,
        completed_at: DateTime<FixedOffset>,
    ) -> Result<Submission, AssessmentError> {
        if !form.active {
            return Err(AssessmentError::State(
                "form is disabled and rejects new submissions".into(),
            ));
        }
        let form_code = form
            .code
            .clone()
            .ok_or_else(|| AssessmentError::State("form has no permanent code".into()))?;

        let mut issues = Vec::new();
        if participant.name.trim().is_empty() {
            issues.push("participant name is empty".to_string());
        }
        if participant.identifier.trim().is_empty() {
            issues.push("participant identifier is empty".to_string());
        }
        for id in answers.keys() {
            if form.question(id).is_none() {
                issues.push(format!("answer references unknown question {id}"));
            }
        }
        if !issues.is_empty() {
            return Err(AssessmentError::Validation { issues });
        }

        let summary = score_answers(form, &answers);

        Ok(Submission {
            submission_id: Uuid::new_v4(),
            form_code,
            participant_name: participant.name.clone(),
            participant_identifier: participant.identifier.clone(),
            answers,
            correct_answers: summary.correct_answers,
            total_questions: summary.total_questions,
            score: summary.score,
            passed: summary.score >= form.passing_score_percent,
            time_spent_seconds,
            completed_at,
        })
    }

    /// The selected text for a question, or "no answer".
    pub fn answer_display(&self, question_id: &str) -> &str {
        self.answers
            .get(question_id)
            .map(|s| s.as_str())
            .unwrap_or("no answer")
    }
}

/// Whether two answer texts refer to the same option.
pub fn same_answer(a: &str, b: &str) -> bool {
    normalize_text(a) == normalize_text(b)
}
