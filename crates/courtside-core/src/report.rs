//! Batch report snapshots with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::batch::Batch;

/// A point-in-time aggregation of submission batches, suitable for export
/// and later re-display. Batches themselves stay computed views; this is
/// just a saved copy of one computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the aggregation ran.
    pub generated_at: DateTime<Utc>,
    /// The inclusive lower bound applied, if any.
    pub from_date: Option<NaiveDate>,
    /// The aggregated batches.
    pub batches: Vec<Batch>,
    /// Sum of batch submission counts.
    pub total_submissions: usize,
    /// Mean score across all included submissions.
    pub overall_average_score: f64,
}

impl BatchReport {
    /// Snapshot a batch computation.
    pub fn from_batches(batches: Vec<Batch>, from_date: Option<NaiveDate>) -> Self {
        let total_submissions: usize = batches.iter().map(|b| b.submission_count).sum();
        let score_sum: f64 = batches
            .iter()
            .flat_map(|b| b.submissions.iter())
            .map(|s| f64::from(s.score))
            .sum();
        let overall_average_score = if total_submissions == 0 {
            0.0
        } else {
            score_sum / total_submissions as f64
        };

        BatchReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            from_date,
            batches,
            total_submissions,
            overall_average_score,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: BatchReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::build_batches;
    use crate::submission::Submission;
    use chrono::{DateTime, FixedOffset};
    use std::collections::{BTreeMap, HashMap};

    fn submission(form_code: &str, score: u32, completed_at: &str) -> Submission {
        Submission {
            submission_id: Uuid::new_v4(),
            form_code: form_code.into(),
            participant_name: "Tester".into(),
            participant_identifier: "900101-01-1234".into(),
            answers: BTreeMap::new(),
            correct_answers: score / 10,
            total_questions: 10,
            score,
            passed: score >= 70,
            time_spent_seconds: 300,
            completed_at: completed_at.parse::<DateTime<FixedOffset>>().unwrap(),
        }
    }

    fn report() -> BatchReport {
        let subs = vec![
            submission("AB12CD", 80, "2026-03-14T09:00:00+08:00"),
            submission("AB12CD", 60, "2026-03-15T09:00:00+08:00"),
        ];
        let batches = build_batches(&subs, &HashMap::new(), None);
        BatchReport::from_batches(batches, None)
    }

    #[test]
    fn totals_span_all_batches() {
        let report = report();
        assert_eq!(report.total_submissions, 2);
        assert!((report.overall_average_score - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_report_has_zero_average() {
        let report = BatchReport::from_batches(vec![], None);
        assert_eq!(report.total_submissions, 0);
        assert_eq!(report.overall_average_score, 0.0);
    }

    #[test]
    fn json_roundtrip() {
        let report = report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batches.json");

        report.save_json(&path).unwrap();
        let loaded = BatchReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.total_submissions, 2);
        assert_eq!(loaded.batches.len(), report.batches.len());
    }
}
