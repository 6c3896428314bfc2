//! TOML form-file parser.
//!
//! Operators author assessment forms as TOML files and feed them to the
//! CLI for validation and publishing. Loads single files and directories,
//! and lints forms for issues worth flagging before publish.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AnswerOption, AssessmentForm, Question};

/// Intermediate TOML structure for form files.
#[derive(Debug, Deserialize)]
struct TomlFormFile {
    form: TomlFormHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlFormHeader {
    title: String,
    #[serde(default)]
    title_alt: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    subtitle_alt: Option<String>,
    #[serde(default = "default_time_limit")]
    time_limit_minutes: u32,
    #[serde(default = "default_passing_score")]
    passing_score_percent: u32,
}

fn default_time_limit() -> u32 {
    30
}

fn default_passing_score() -> u32 {
    70
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    section: String,
    prompt: String,
    #[serde(default)]
    prompt_alt: Option<String>,
    /// Bare strings and `{ text, text_alt }` tables both accepted.
    #[serde(default)]
    options: Vec<AnswerOption>,
    correct_answer: String,
}

/// Parse a single TOML file into a draft [`AssessmentForm`].
pub fn parse_form_file(path: &Path) -> Result<AssessmentForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form file: {}", path.display()))?;
    parse_form_str(&content, path)
}

/// Parse a TOML string into a draft form (useful for testing).
///
/// File-authored forms always come in as drafts without a code; saving
/// and publishing assign the rest.
pub fn parse_form_str(content: &str, source_path: &Path) -> Result<AssessmentForm> {
    let parsed: TomlFormFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            section: q.section,
            prompt: q.prompt,
            prompt_alt: q.prompt_alt,
            options: q.options,
            correct_answer: q.correct_answer,
        })
        .collect();

    Ok(AssessmentForm {
        code: None,
        title: parsed.form.title,
        title_alt: parsed.form.title_alt,
        subtitle: parsed.form.subtitle,
        subtitle_alt: parsed.form.subtitle_alt,
        time_limit_minutes: parsed.form.time_limit_minutes,
        passing_score_percent: parsed.form.passing_score_percent,
        questions,
        is_draft: true,
        active: true,
    })
}

/// Recursively load all `.toml` form files from a directory.
pub fn load_form_directory(dir: &Path) -> Result<Vec<AssessmentForm>> {
    let mut forms = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            forms.extend(load_form_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_form_file(&path) {
                Ok(form) => forms.push(form),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(forms)
}

/// A warning from form linting.
#[derive(Debug, Clone)]
pub struct FormWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Lint a form for issues worth fixing before publish.
///
/// Hard validity is [`AssessmentForm::publish_issues`]; this adds the
/// softer checks operators routinely miss.
pub fn lint_form(form: &AssessmentForm) -> Vec<FormWarning> {
    let mut warnings = Vec::new();

    if form.passing_score_percent == 0 || form.passing_score_percent > 100 {
        warnings.push(FormWarning {
            question_id: None,
            message: format!(
                "passing score {} outside 1-100",
                form.passing_score_percent
            ),
        });
    }
    if form.time_limit_minutes == 0 {
        warnings.push(FormWarning {
            question_id: None,
            message: "time limit is zero minutes".into(),
        });
    }

    // Duplicate question ids
    let mut seen_ids = std::collections::HashSet::new();
    for q in &form.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(FormWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &form.questions {
        if q.options.len() < 2 {
            warnings.push(FormWarning {
                question_id: Some(q.id.clone()),
                message: "fewer than 2 options".into(),
            });
        }

        // A bilingual form should be bilingual throughout.
        if form.title_alt.is_some() && q.prompt_alt.is_none() {
            warnings.push(FormWarning {
                question_id: Some(q.id.clone()),
                message: "form has a secondary-language title but this prompt has none".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[form]
title = "Referee Certification Level 1"
title_alt = "Pensijilan Pengadil Tahap 1"
time_limit_minutes = 45
passing_score_percent = 70

[[questions]]
id = "q1"
section = "Service Rules"
prompt = "Which serve is a fault?"
prompt_alt = "Servis manakah yang salah?"
options = ["Underarm serve", "Serve above the waist", "Backhand serve"]
correct_answer = "Serve above the waist"

[[questions]]
id = "q2"
section = "Scoring"
prompt = "A rally game ends at how many points?"
prompt_alt = "Permainan rali tamat pada berapa mata?"
options = [
    { text = "15", text_alt = "15" },
    { text = "21", text_alt = "21" },
]
correct_answer = "21"
"#;

    #[test]
    fn parse_valid_toml() {
        let form = parse_form_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(form.title, "Referee Certification Level 1");
        assert_eq!(form.time_limit_minutes, 45);
        assert_eq!(form.questions.len(), 2);
        assert!(form.is_draft);
        assert!(form.code.is_none());
        assert!(form.is_publishable());
    }

    #[test]
    fn parse_mixed_option_shapes() {
        let form = parse_form_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(form.questions[0].options[1].text, "Serve above the waist");
        assert!(form.questions[0].options[1].text_alt.is_none());
        assert_eq!(form.questions[1].options[1].text, "21");
        assert_eq!(form.questions[1].options[1].text_alt.as_deref(), Some("21"));
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[form]
title = "Minimal"

[[questions]]
id = "q1"
section = "General"
prompt = "Pick A"
options = ["A", "B"]
correct_answer = "A"
"#;
        let form = parse_form_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(form.time_limit_minutes, 30);
        assert_eq!(form.passing_score_percent, 70);
        assert!(form.title_alt.is_none());
    }

    #[test]
    fn lint_duplicate_ids() {
        let toml = r#"
[form]
title = "Dupes"

[[questions]]
id = "same"
section = "A"
prompt = "First"
options = ["A", "B"]
correct_answer = "A"

[[questions]]
id = "same"
section = "A"
prompt = "Second"
options = ["A", "B"]
correct_answer = "B"
"#;
        let form = parse_form_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = lint_form(&form);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn lint_too_few_options_and_missing_alt() {
        let toml = r#"
[form]
title = "Sparse"
title_alt = "Jarang"

[[questions]]
id = "q1"
section = "A"
prompt = "Only one option"
options = ["A"]
correct_answer = "A"
"#;
        let form = parse_form_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = lint_form(&form);
        assert!(warnings.iter().any(|w| w.message.contains("fewer than 2")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("secondary-language")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_form_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("referee-l1.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let forms = load_form_directory(dir.path()).unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].title, "Referee Certification Level 1");
    }
}
