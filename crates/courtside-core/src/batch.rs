//! Daily reporting batches.
//!
//! Batches are computed views over the submission set, never stored. The
//! grouping date is taken from each submission's `completed_at` in its
//! recorded offset (calendar components, no UTC conversion), so a 23:50
//! local completion never shifts into the next day's batch.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::submission::Submission;

/// Pass threshold used for batch-level pass counts.
///
/// Deliberately fixed at 70 regardless of each form's own
/// `passing_score_percent`; the portal has always displayed batches this
/// way and reports are expected to match it.
pub const BATCH_PASS_THRESHOLD: u32 = 70;

/// All submissions for one form on one calendar day, with derived stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub form_code: String,
    /// Denormalized at aggregation time; `None` when the parent form was
    /// deleted, in which case the report layer shows the code alone.
    pub form_title: Option<String>,
    pub date: NaiveDate,
    pub submissions: Vec<Submission>,
    pub submission_count: usize,
    /// Mean of `score` across the batch.
    pub average_score: f64,
    /// Count of submissions with `score >= BATCH_PASS_THRESHOLD`.
    pub pass_count: usize,
}

/// Group submissions into `(form_code, calendar day)` batches.
///
/// `from_date` is an inclusive lower bound; earlier batches are dropped.
/// No ordering guarantee — the reporting layer sorts for display.
pub fn build_batches(
    submissions: &[Submission],
    form_titles: &HashMap<String, String>,
    from_date: Option<NaiveDate>,
) -> Vec<Batch> {
    let mut grouped: HashMap<(String, NaiveDate), Vec<&Submission>> = HashMap::new();
    for sub in submissions {
        let date = sub.completed_at.date_naive();
        grouped
            .entry((sub.form_code.clone(), date))
            .or_default()
            .push(sub);
    }

    grouped
        .into_iter()
        .filter(|((_, date), _)| from_date.is_none_or(|from| *date >= from))
        .map(|((form_code, date), subs)| {
            let submission_count = subs.len();
            let average_score = subs.iter().map(|s| f64::from(s.score)).sum::<f64>()
                / submission_count.max(1) as f64;
            let pass_count = subs
                .iter()
                .filter(|s| s.score >= BATCH_PASS_THRESHOLD)
                .count();

            Batch {
                form_title: form_titles.get(&form_code).cloned(),
                form_code,
                date,
                submissions: subs.into_iter().cloned().collect(),
                submission_count,
                average_score,
                pass_count,
            }
        })
        .collect()
}
