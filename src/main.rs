use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

use logics::output::{self, OutputMode};
use logics::registry::constants::REGISTRY_DISPLAY;
use logics::ui::TerminalPrompter;
use logics::workflow::{Orchestrator, SetupOutcome, Settings, WorkflowError};
use logics::{display_eprintln, display_println, ProcessRunner};

#[derive(Parser)]
#[command(name = "logics")]
#[command(
    about = "Version control for distributed teams of music producers",
    long_about = "logics is a version control system for distributed teams of music producers.\n\
                  It uses a shared (Dropbox) folder as remote repository. Files are tracked\n\
                  with git and git-lfs, using a folder-based transfer agent for large files.\n\n\
                  GETTING STARTED:\n  \
                  1. Run 'logics setup' once to pick the shared and project folders\n  \
                  2. Run 'logics install' to clone a shared project\n  \
                  3. Use 'logics download' and 'logics upload' to sync your work"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Registry file path (default is ~/.logics.yml)
    #[arg(short, long, global = true, env = "LOGICS_CONFIG")]
    config: Option<PathBuf>,

    /// Seconds to wait for a single git command before giving up (0 waits forever).
    /// Cloning a project during install is never cut short
    #[arg(long, global = true, env = "LOGICS_STEP_TIMEOUT")]
    step_timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick the shared and project folders and write the registry
    Setup,

    /// Install a project hosted on the shared folder
    Install {
        /// Install into this folder instead of the configured project folder
        #[arg(short, long, alias = "projectfolder")]
        project_folder: Option<PathBuf>,
    },

    /// Update a local project with all changes performed remotely
    Download {
        /// Also fetch the large audio files instead of pointer placeholders
        #[arg(short, long)]
        fetch_tracks: bool,
    },

    /// Upload your modifications to the shared folder
    Upload {
        /// Commit message (default: "committing work on Logic")
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List all installed projects by name
    List {
        /// Print the registry entries as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    output::init_with_verbosity(mode, cli.verbose);

    let mut settings = Settings::default();
    if let Some(path) = cli.config {
        settings = settings.with_registry_path(path);
    }
    if let Some(secs) = cli.step_timeout {
        settings = settings.with_step_timeout_secs(secs);
    }

    let runner = ProcessRunner::new().with_timeout(settings.step_timeout);
    let prompter = TerminalPrompter::new();
    let orchestrator = Orchestrator::new(&settings, &runner, &prompter);

    match run(cli.command, &orchestrator).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}

async fn run(command: Commands, orchestrator: &Orchestrator<'_>) -> Result<()> {
    match command {
        Commands::Setup => match orchestrator.setup().await? {
            SetupOutcome::Unchanged => {
                display_println!("{} Okidokey, setup left unchanged", style("ℹ").blue());
            }
            SetupOutcome::Configured { registry, .. } => {
                display_println!(
                    "{} Shared folder: {}",
                    style("→").dim(),
                    style(registry.shared_folder.display()).cyan()
                );
                display_println!(
                    "{} Project folder: {}",
                    style("→").dim(),
                    style(registry.project_folder.display()).cyan()
                );
            }
        },

        Commands::Install { project_folder } => {
            let installed = orchestrator.install(project_folder.as_deref()).await?;
            display_println!(
                "\n{} Installed '{}' in {}",
                style("🎉").green(),
                style(&installed.repository.name).cyan().bold(),
                style(installed.repository.location.display()).dim()
            );
        }

        Commands::Download { fetch_tracks } => {
            let downloaded = orchestrator.download(fetch_tracks).await?;
            display_println!(
                "{} '{}' is up to date",
                style("✓").green().bold(),
                style(&downloaded.repository.name).cyan()
            );
        }

        Commands::Upload { message } => {
            let uploaded = orchestrator.upload(message.as_deref()).await?;
            display_println!(
                "{} Uploaded '{}' ({} steps)",
                style("✓").green().bold(),
                style(&uploaded.repository.name).cyan(),
                uploaded.report.steps.len()
            );
        }

        Commands::List { json } => {
            let repos = orchestrator.list().await?;
            if json {
                let rendered = serde_json::to_string_pretty(&repos)?;
                display_println!("{}", rendered);
            } else if repos.is_empty() {
                display_println!(
                    "{} No project installed yet. Run 'logics install' to add one",
                    style("ℹ").yellow()
                );
            } else {
                for repo in &repos {
                    display_println!("{}", repo.name);
                }
            }
        }
    }

    Ok(())
}

fn report_failure(err: &anyhow::Error) -> ExitCode {
    let Some(workflow_err) = err.downcast_ref::<WorkflowError>() else {
        display_eprintln!("{} {:#}", style("✗").red().bold(), err);
        return ExitCode::FAILURE;
    };

    if workflow_err.is_cancelled() {
        display_eprintln!("{} cancelled", style("ℹ").yellow());
        return ExitCode::from(130);
    }

    display_eprintln!("{} {}", style("✗").red().bold(), workflow_err);

    if let WorkflowError::Registry(_) = workflow_err {
        display_eprintln!(
            "  {} the registry lives at {} unless --config is given",
            style("→").dim(),
            REGISTRY_DISPLAY
        );
    }

    let completed = workflow_err.completed_steps();
    if !completed.is_empty() {
        display_eprintln!(
            "{} These steps already completed and were not undone:",
            style("⚠").yellow()
        );
        for step in completed {
            display_eprintln!("  {} {}", style("→").dim(), step);
        }
    }

    ExitCode::FAILURE
}
