//! The `courtside init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("courtside.toml").exists() {
        println!("courtside.toml already exists, skipping.");
    } else {
        std::fs::write("courtside.toml", SAMPLE_CONFIG)?;
        println!("Created courtside.toml");
    }

    std::fs::create_dir_all("forms")?;
    let example_path = std::path::Path::new("forms/example.toml");
    if example_path.exists() {
        println!("forms/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_FORM)?;
        println!("Created forms/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit courtside.toml with the portal URL and token");
    println!("  2. Run: courtside validate --form forms/example.toml");
    println!("  3. Run: courtside publish --form forms/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# courtside configuration

api_url = "http://localhost:8080"
api_token = "${COURTSIDE_API_TOKEN}"
report_dir = "./courtside-reports"
"#;

const EXAMPLE_FORM: &str = r#"[form]
title = "Referee Certification Level 1"
title_alt = "Pensijilan Pengadil Tahap 1"
subtitle = "Service and scoring fundamentals"
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
    { text = "25", text_alt = "25" },
]
correct_answer = "21"

[[questions]]
id = "q3"
section = "Court"
prompt = "Is the centre line part of the right service court?"
options = ["Yes", "No"]
correct_answer = "Yes"
"#;
