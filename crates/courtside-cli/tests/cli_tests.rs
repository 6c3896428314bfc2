//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn courtside() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("courtside").unwrap()
}

const VALID_FORM: &str = r#"[form]
title = "Referee Certification Level 1"
time_limit_minutes = 45

[[questions]]
id = "q1"
section = "Service Rules"
prompt = "Which serve is a fault?"
options = ["Underarm serve", "Serve above the waist"]
correct_answer = "Serve above the waist"

[[questions]]
id = "q2"
section = "Scoring"
prompt = "A rally game ends at how many points?"
options = ["15", "21"]
correct_answer = "21"
"#;

const BROKEN_FORM: &str = r#"[form]
title = "Broken"

[[questions]]
id = "q1"
section = "General"
prompt = "Pick A"
options = ["A", "B"]
correct_answer = "Z"
"#;

#[test]
fn validate_valid_form() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("referee-l1.toml");
    std::fs::write(&path, VALID_FORM).unwrap();

    courtside()
        .arg("validate")
        .arg("--form")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions"))
        .stdout(predicate::str::contains("All forms publishable"));
}

#[test]
fn validate_broken_form_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, BROKEN_FORM).unwrap();

    courtside()
        .arg("validate")
        .arg("--form")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("one.toml"), VALID_FORM).unwrap();

    courtside()
        .arg("validate")
        .arg("--form")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Referee Certification Level 1"));
}

#[test]
fn validate_nonexistent_file() {
    courtside()
        .arg("validate")
        .arg("--form")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn publish_dry_run_needs_no_portal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("referee-l1.toml");
    std::fs::write(&path, VALID_FORM).unwrap();

    courtside()
        .arg("publish")
        .arg("--form")
        .arg(&path)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("publishable"));
}

#[test]
fn publish_broken_form_fails_before_any_network() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, BROKEN_FORM).unwrap();

    courtside()
        .arg("publish")
        .arg("--form")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not publishable"));
}

#[test]
fn revoke_code_rejects_permanent_codes() {
    courtside()
        .arg("revoke-code")
        .arg("--code")
        .arg("AB12CD")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a temporary code"));
}

#[test]
fn clear_submissions_requires_confirmation() {
    courtside()
        .arg("clear-submissions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn batches_rejects_bad_from_date() {
    courtside()
        .arg("batches")
        .arg("--from")
        .arg("14-03-2026")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --from date"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    courtside()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created courtside.toml"))
        .stdout(predicate::str::contains("Created forms/example.toml"));

    assert!(dir.path().join("courtside.toml").exists());
    assert!(dir.path().join("forms/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    courtside()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    courtside()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_example_form_validates() {
    let dir = TempDir::new().unwrap();

    courtside()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    courtside()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--form")
        .arg("forms/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All forms publishable"));
}

#[test]
fn help_output() {
    courtside()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Assessment lifecycle admin console"));
}

#[test]
fn version_output() {
    courtside()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("courtside"));
}
