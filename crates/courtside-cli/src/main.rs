//! courtside CLI — the admin console for the assessment portal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "courtside", version, about = "Assessment lifecycle admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate form TOML files without touching the portal
    Validate {
        /// Path to a .toml form file or directory
        #[arg(long)]
        form: PathBuf,
    },

    /// Publish a form file to the portal
    Publish {
        /// Path to a .toml form file
        #[arg(long)]
        form: PathBuf,

        /// Validate and report, but do not save anything
        #[arg(long)]
        dry_run: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List stored assessment forms
    Forms {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Issue a 24-hour temporary entry code for a form
    IssueCode {
        /// Permanent code of the target form
        #[arg(long)]
        form_code: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List currently valid temporary codes
    Codes {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Revoke a temporary code before it expires
    RevokeCode {
        /// The TMP- code to remove
        #[arg(long)]
        code: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List recorded submissions
    Submissions {
        /// Only show submissions for this form code
        #[arg(long)]
        form_code: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Aggregate submissions into daily batches
    Batches {
        /// Inclusive lower bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Save a report snapshot to the configured report directory
        #[arg(long)]
        save: bool,

        /// Snapshot format: markdown, json, all
        #[arg(long, default_value = "markdown")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete every recorded submission
    ClearSubmissions {
        /// Actually do it
        #[arg(long)]
        yes: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and an example form file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("courtside=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { form } => commands::validate::execute(form),
        Commands::Publish {
            form,
            dry_run,
            config,
        } => commands::publish::execute(form, dry_run, config).await,
        Commands::Forms { config } => commands::forms::execute(config).await,
        Commands::IssueCode { form_code, config } => {
            commands::issue_code::execute(form_code, config).await
        }
        Commands::Codes { config } => commands::codes::execute(config).await,
        Commands::RevokeCode { code, config } => {
            commands::revoke_code::execute(code, config).await
        }
        Commands::Submissions { form_code, config } => {
            commands::submissions::execute(form_code, config).await
        }
        Commands::Batches {
            from,
            save,
            format,
            config,
        } => commands::batches::execute(from, save, format, config).await,
        Commands::ClearSubmissions { yes, config } => {
            commands::clear_submissions::execute(yes, config).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
