use console::style;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::error::WorkflowError;
use super::orchestrator::Orchestrator;
use super::report::{StepSequence, WorkflowReport};
use crate::display_println;
use crate::registry::constants::{get_default_project_folder, get_default_shared_folder};
use crate::registry::{Registry, RegistryError};
use crate::vcs::ExecError;

#[derive(Debug, Clone)]
pub enum SetupOutcome {
    /// A registry existed and the user chose to keep it
    Unchanged,
    Configured {
        registry: Registry,
        report: WorkflowReport,
    },
}

impl Orchestrator<'_> {
    /// Produce the registry: ask for the shared and project folders, write the
    /// file and register the git-lfs filters.
    pub async fn setup(&self) -> Result<SetupOutcome, WorkflowError> {
        let mut steps = StepSequence::new(self.runner);

        match steps.run(self.git.version()).await {
            Err(WorkflowError::Step {
                source: ExecError::NotFound { .. },
                ..
            }) => {
                return Err(WorkflowError::Validation(
                    "no git installation found".to_string(),
                ))
            }
            other => other?,
        }

        let registry_path = &self.settings.registry_path;
        let mut previous = Vec::new();

        if registry_path.exists() {
            let rerun = self.prompt.confirm(&format!(
                "A setup was likely already run (and created the configuration at {}). Do you want to re-run the setup?",
                registry_path.display()
            ))?;
            if !rerun {
                info!("keeping existing registry at {}", registry_path.display());
                return Ok(SetupOutcome::Unchanged);
            }

            match Registry::load_from_file(registry_path).await {
                Ok(existing) => previous = existing.repos,
                Err(RegistryError::Malformed { .. }) => {
                    warn!(
                        "existing registry at {} is unreadable and will be replaced",
                        registry_path.display()
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        let shared_folder = self.ask_shared_folder()?;
        let project_folder = self.ask_project_folder().await?;

        let mut registry = Registry::new(shared_folder, project_folder);
        registry.repos = previous;
        registry.save_to_file(registry_path).await?;

        display_println!(
            "{} Preferences saved to {}",
            style("✓").green().bold(),
            style(registry_path.display()).cyan()
        );

        steps.run(self.git.lfs_install()).await?;
        display_println!("{} git-lfs filters registered", style("✓").green().bold());

        Ok(SetupOutcome::Configured {
            registry,
            report: steps.finish(),
        })
    }

    fn ask_shared_folder(&self) -> Result<PathBuf, WorkflowError> {
        let default = get_default_shared_folder();
        let answer = self.prompt.input(
            "Please input the shared folder path",
            &default.display().to_string(),
        )?;
        let folder = expand_home(answer.trim());

        if !folder.is_dir() {
            return Err(WorkflowError::Validation(format!(
                "could not find {} on this machine. Please make sure you use a fully qualified name (e.g. /Users/pippo/Dropbox)",
                folder.display()
            )));
        }

        Ok(folder)
    }

    async fn ask_project_folder(&self) -> Result<PathBuf, WorkflowError> {
        let default = get_default_project_folder();
        let answer = self.prompt.input(
            "Please input your project folder",
            &default.display().to_string(),
        )?;
        let folder = expand_home(answer.trim());

        if folder.is_dir() {
            return Ok(folder);
        }

        let create = self.prompt.confirm(&format!(
            "Cannot find {}. Do you want to create it?",
            folder.display()
        ))?;
        if !create {
            return Err(WorkflowError::Validation(
                "Cannot setup without a project folder".to_string(),
            ));
        }

        tokio::fs::create_dir_all(&folder)
            .await
            .map_err(|source| WorkflowError::Filesystem {
                path: folder.clone(),
                source,
            })?;

        Ok(folder)
    }
}

/// Resolve a leading `~` against the home directory
fn expand_home(input: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

    match input {
        "~" => home(),
        _ => match input.strip_prefix("~/") {
            Some(rest) => home().join(rest),
            None => Path::new(input).to_path_buf(),
        },
    }
}
