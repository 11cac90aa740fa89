use console::style;
use std::path::Path;
use tracing::{info, warn};

use super::error::WorkflowError;
use super::orchestrator::Orchestrator;
use super::report::{Installed, StepSequence};
use crate::display_println;
use crate::registry::{project_stem, Repository};
use crate::workspace::discover_candidates;

impl Orchestrator<'_> {
    /// Clone a shared project that is not installed yet and wire its
    /// large-file transport to the shared folder.
    ///
    /// `project_folder` overrides the registry's project folder. Nothing is
    /// rolled back on failure: the error lists the steps that already ran.
    pub async fn install(&self, project_folder: Option<&Path>) -> Result<Installed, WorkflowError> {
        let mut registry = self.load_registry().await?;

        let target_dir = project_folder
            .map(Path::to_path_buf)
            .unwrap_or_else(|| registry.project_folder.clone());
        if !target_dir.is_dir() {
            return Err(WorkflowError::Validation(format!(
                "project folder {} does not exist. Please (re)run `logics setup` or specify a different folder",
                target_dir.display()
            )));
        }

        let candidates = discover_candidates(&registry.shared_folder, &registry)
            .await
            .map_err(|e| {
                WorkflowError::Validation(format!(
                    "could not read shared folder {}: {e}",
                    registry.shared_folder.display()
                ))
            })?;

        if candidates.is_empty() {
            return Err(WorkflowError::Validation(format!(
                "nothing new to install: no new project found in {}",
                registry.shared_folder.display()
            )));
        }

        let labels: Vec<String> = candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let index = self.select("select which project you want to install", &labels)?;
        let remote = candidates[index].clone();

        let name = project_stem(&remote).ok_or_else(|| {
            WorkflowError::Validation(format!("{} has no usable project name", remote.display()))
        })?;
        let local = target_dir.join(&name);

        if local.exists() {
            return Err(WorkflowError::Validation(format!(
                "{} already exists. Remove it or install into a different project folder",
                local.display()
            )));
        }

        info!("installing {} into {}", remote.display(), local.display());

        let mut steps = StepSequence::new(self.runner);
        steps.run(self.git.clone_repo(&remote, &local)).await?;
        steps
            .run_all(self.git.configure_transfer(&local, &remote))
            .await?;
        steps.run(self.git.reset_hard(&local)).await?;

        display_println!(
            "{} new repository installed and configured",
            style("✓").green().bold()
        );

        let repository = Repository::new(name, &local).with_remote(&remote);
        registry.append(repository.clone());

        if let Err(source) = registry.save_to_file(&self.settings.registry_path).await {
            warn!(
                "{} was installed but the registry could not be saved",
                local.display()
            );
            return Err(WorkflowError::Persist {
                completed: steps.completed(),
                source,
            });
        }

        display_println!("{} preferences saved", style("✓").green().bold());

        Ok(Installed {
            repository,
            report: steps.finish(),
        })
    }
}
