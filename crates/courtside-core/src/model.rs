//! Core data model types for courtside.
//!
//! These are the fundamental types the entire courtside system uses to
//! represent certification forms and their multiple-choice questions. They
//! serialize to the camelCase JSON shape the portal API exchanges.

use serde::{Deserialize, Serialize};

/// Normalize answer text for comparison: trimmed, case-folded.
///
/// Every correctness check in the engine (option uniqueness, correct-answer
/// matching, submission scoring) goes through this one function.
pub fn normalize_text(s: &str) -> String {
    s.trim().to_lowercase()
}

/// One selectable answer, with an optional secondary-language variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawAnswerOption", rename_all = "camelCase")]
pub struct AnswerOption {
    /// Primary-language text. Uniqueness within a question is enforced on
    /// the normalized form.
    pub text: String,
    /// Secondary-language text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_alt: Option<String>,
}

/// Wire shape of an option. Older portal payloads send a bare string, newer
/// ones an object (with `malay` as the historical secondary-language key).
/// Everything downstream of deserialization sees only [`AnswerOption`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswerOption {
    Bare(String),
    #[serde(rename_all = "camelCase")]
    Full {
        text: String,
        // snake_case from TOML form files, `malay` from legacy payloads.
        #[serde(default, alias = "text_alt", alias = "malay")]
        text_alt: Option<String>,
    },
}

impl From<RawAnswerOption> for AnswerOption {
    fn from(raw: RawAnswerOption) -> Self {
        match raw {
            RawAnswerOption::Bare(text) => AnswerOption {
                text,
                text_alt: None,
            },
            RawAnswerOption::Full { text, text_alt } => AnswerOption { text, text_alt },
        }
    }
}

impl AnswerOption {
    pub fn new(text: impl Into<String>) -> Self {
        AnswerOption {
            text: text.into(),
            text_alt: None,
        }
    }
}

/// A single multiple-choice item on a certification form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque identifier, unique within a form.
    pub id: String,
    /// Free-text grouping label shown as a section header.
    pub section: String,
    /// Primary-language prompt.
    pub prompt: String,
    /// Secondary-language prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_alt: Option<String>,
    /// Ordered answer options. Order is display order.
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    /// Must equal the `text` of exactly one option (normalized comparison).
    pub correct_answer: String,
}

impl Question {
    /// Collect every validity issue with this question. Empty means valid.
    ///
    /// Pure value check with no side effects; the form level additionally
    /// requires at least two options before publishing.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.section.trim().is_empty() {
            issues.push("section is empty".to_string());
        }
        if self.prompt.trim().is_empty() {
            issues.push("prompt is empty".to_string());
        }
        if self.options.is_empty() {
            issues.push("no answer options".to_string());
        }

        for (i, opt) in self.options.iter().enumerate() {
            if opt.text.trim().is_empty() {
                issues.push(format!("option {} has empty text", i + 1));
            }
        }

        // Option texts must be unique under normalization, otherwise the
        // correct-answer marker is ambiguous.
        let mut seen = std::collections::HashSet::new();
        for opt in &self.options {
            let norm = normalize_text(&opt.text);
            if !norm.is_empty() && !seen.insert(norm) {
                issues.push(format!("duplicate option text: {}", opt.text.trim()));
            }
        }

        if self.correct_answer.trim().is_empty() {
            issues.push("correct answer is empty".to_string());
        } else {
            let target = normalize_text(&self.correct_answer);
            let matches = self
                .options
                .iter()
                .filter(|o| normalize_text(&o.text) == target)
                .count();
            if matches != 1 {
                issues.push(format!(
                    "correct answer '{}' matches {} options, expected exactly 1",
                    self.correct_answer.trim(),
                    matches
                ));
            }
        }

        issues
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Whether the given selected text is the correct answer.
    pub fn is_correct(&self, selected: &str) -> bool {
        normalize_text(selected) == normalize_text(&self.correct_answer)
    }
}

/// A certification assessment form: ordered questions plus metadata and
/// lifecycle flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentForm {
    /// Short permanent identifier, assigned once at first successful save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Required title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_alt: Option<String>,
    /// Attempt time limit in minutes.
    #[serde(default = "default_time_limit")]
    pub time_limit_minutes: u32,
    /// Pass threshold applied to individual submissions (1–100).
    #[serde(default = "default_passing_score")]
    pub passing_score_percent: u32,
    /// Insertion order defines display and numbering order.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Drafts are editable and excluded from the public code directory.
    #[serde(default)]
    pub is_draft: bool,
    /// Disabled forms reject new submissions and temp-code issuance but are
    /// retained for history.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_time_limit() -> u32 {
    30
}

fn default_passing_score() -> u32 {
    70
}

fn default_true() -> bool {
    true
}

impl AssessmentForm {
    /// New draft with no code and default limits.
    pub fn draft(title: impl Into<String>) -> Self {
        AssessmentForm {
            code: None,
            title: title.into(),
            title_alt: None,
            subtitle: None,
            subtitle_alt: None,
            time_limit_minutes: default_time_limit(),
            passing_score_percent: default_passing_score(),
            questions: Vec::new(),
            is_draft: true,
            active: true,
        }
    }

    /// Collect every issue blocking publication: missing title, empty
    /// question list, and each invalid question's own issues (prefixed with
    /// its id so the operator can fix everything in one pass).
    pub fn publish_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push("title is empty".to_string());
        }
        if self.questions.is_empty() {
            issues.push("form has no questions".to_string());
        }
        if self.passing_score_percent == 0 || self.passing_score_percent > 100 {
            issues.push(format!(
                "passing score {} outside 1-100",
                self.passing_score_percent
            ));
        }

        for q in &self.questions {
            for issue in q.validate() {
                issues.push(format!("question {}: {}", q.id, issue));
            }
            if q.options.len() < 2 {
                issues.push(format!(
                    "question {}: fewer than 2 options",
                    q.id
                ));
            }
        }

        issues
    }

    pub fn is_publishable(&self) -> bool {
        self.publish_issues().is_empty()
    }

    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: &str, options: &[&str]) -> Question {
        Question {
            id: "q1".into(),
            section: "Rules".into(),
            prompt: "Which call is correct?".into(),
            prompt_alt: None,
            options: options.iter().map(|o| AnswerOption::new(*o)).collect(),
            correct_answer: correct.into(),
        }
    }

    #[test]
    fn option_deserializes_from_bare_string() {
        let opt: AnswerOption = serde_json::from_str("\"Net fault\"").unwrap();
        assert_eq!(opt.text, "Net fault");
        assert!(opt.text_alt.is_none());
    }

    #[test]
    fn option_deserializes_from_object_with_legacy_key() {
        let opt: AnswerOption =
            serde_json::from_str(r#"{"text": "Net fault", "malay": "Sentuh jaring"}"#).unwrap();
        assert_eq!(opt.text, "Net fault");
        assert_eq!(opt.text_alt.as_deref(), Some("Sentuh jaring"));
    }

    #[test]
    fn bilingual_option_roundtrips() {
        let opt = AnswerOption {
            text: "Net fault".into(),
            text_alt: Some("Sentuh jaring".into()),
        };
        let json = serde_json::to_string(&opt).unwrap();
        assert!(json.contains("textAlt"));
        let back: AnswerOption = serde_json::from_str(&json).unwrap();
        assert_eq!(back.text_alt.as_deref(), Some("Sentuh jaring"));
    }

    #[test]
    fn valid_question() {
        let q = question("B", &["A", "B", "C"]);
        assert!(q.is_valid());
        assert!(q.validate().is_empty());
    }

    #[test]
    fn correct_answer_matching_is_case_and_whitespace_insensitive() {
        let q = question("  net FAULT ", &["Net fault", "Let serve"]);
        assert!(q.is_valid());
        assert!(q.is_correct("NET FAULT"));
        assert!(q.is_correct(" net fault "));
        assert!(!q.is_correct("Let serve"));
    }

    #[test]
    fn correct_answer_must_match_exactly_one_option() {
        let none = question("D", &["A", "B", "C"]);
        assert!(!none.is_valid());

        let ambiguous = question("a", &["A", " a ", "B"]);
        let issues = ambiguous.validate();
        assert!(issues.iter().any(|i| i.contains("duplicate option")));
        assert!(issues.iter().any(|i| i.contains("matches 2 options")));
    }

    #[test]
    fn empty_fields_are_each_reported() {
        let q = Question {
            id: "q9".into(),
            section: "  ".into(),
            prompt: String::new(),
            prompt_alt: None,
            options: vec![],
            correct_answer: String::new(),
        };
        let issues = q.validate();
        assert!(issues.iter().any(|i| i.contains("section")));
        assert!(issues.iter().any(|i| i.contains("prompt")));
        assert!(issues.iter().any(|i| i.contains("options")));
        assert!(issues.iter().any(|i| i.contains("correct answer")));
    }

    #[test]
    fn draft_defaults() {
        let form = AssessmentForm::draft("Referee Level 1");
        assert!(form.code.is_none());
        assert!(form.is_draft);
        assert!(form.active);
        assert_eq!(form.time_limit_minutes, 30);
        assert_eq!(form.passing_score_percent, 70);
    }

    #[test]
    fn publish_issues_name_every_invalid_question() {
        let mut form = AssessmentForm::draft("Referee Level 1");
        form.questions.push(question("B", &["A", "B"]));
        let mut broken = question("Z", &["A", "B"]);
        broken.id = "q2".into();
        form.questions.push(broken);
        let mut single = question("A", &["A"]);
        single.id = "q3".into();
        form.questions.push(single);

        let issues = form.publish_issues();
        assert!(issues.iter().any(|i| i.starts_with("question q2:")));
        assert!(issues.iter().any(|i| i.contains("q3") && i.contains("fewer than 2")));
        assert!(!issues.iter().any(|i| i.starts_with("question q1:")));
    }

    #[test]
    fn publishable_requires_title_and_questions() {
        let empty = AssessmentForm::draft("  ");
        let issues = empty.publish_issues();
        assert!(issues.iter().any(|i| i.contains("title")));
        assert!(issues.iter().any(|i| i.contains("no questions")));

        let mut ok = AssessmentForm::draft("Referee Level 1");
        ok.questions.push(question("B", &["A", "B"]));
        assert!(ok.is_publishable());
    }

    #[test]
    fn form_serde_roundtrip_uses_camel_case() {
        let mut form = AssessmentForm::draft("Referee Level 1");
        form.questions.push(question("B", &["A", "B"]));
        let json = serde_json::to_string(&form).unwrap();
        assert!(json.contains("timeLimitMinutes"));
        assert!(json.contains("passingScorePercent"));
        assert!(json.contains("correctAnswer"));
        let back: AssessmentForm = serde_json::from_str(&json).unwrap();
        assert_eq!(back.title, "Referee Level 1");
        assert_eq!(back.questions.len(), 1);
    }
}
