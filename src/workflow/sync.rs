use console::style;
use tracing::info;

use super::error::WorkflowError;
use super::orchestrator::Orchestrator;
use super::report::{Downloaded, StepSequence, Uploaded};
use crate::display_println;
use crate::workspace::ChangeDetector;

impl Orchestrator<'_> {
    /// Bring a registered working copy up to date with the shared folder.
    ///
    /// With `fetch_large_files` the actual large-file content is fetched after
    /// the pull instead of leaving pointer placeholders.
    pub async fn download(&self, fetch_large_files: bool) -> Result<Downloaded, WorkflowError> {
        let registry = self.load_registry().await?;
        let repository = self.choose_repository(&registry, "select which project you want to sync")?;
        let path = repository.working_copy();

        let mut steps = StepSequence::new(self.runner);
        steps.run(self.git.pull(&path)).await?;
        if fetch_large_files {
            steps.run(self.git.lfs_pull(&path)).await?;
        }

        info!("{} is up to date", repository.name);

        Ok(Downloaded {
            repository,
            report: steps.finish(),
        })
    }

    /// Commit everything in a registered working copy and push it.
    ///
    /// A clean working copy runs no mutating step. A failed push keeps the
    /// local commit.
    pub async fn upload(&self, message: Option<&str>) -> Result<Uploaded, WorkflowError> {
        let registry = self.load_registry().await?;
        let repository =
            self.choose_repository(&registry, "select which project you want to upload")?;
        let path = repository.working_copy();

        let detector = ChangeDetector::new(self.runner, &self.git);
        let changes = match detector.change_summary(&path).await {
            Ok(Some(changes)) => changes,
            Ok(None) => {
                return Err(WorkflowError::Validation(
                    "no changes detected: nothing to do!".to_string(),
                ))
            }
            Err(source) => {
                return Err(WorkflowError::Step {
                    step: detector.status_step(&path),
                    completed: Vec::new(),
                    source,
                })
            }
        };

        display_println!(
            "{} Following changes have been detected for {}",
            style("ℹ").blue(),
            style(path.display()).cyan()
        );
        display_println!("{}", changes.trim_end());

        let message = message.unwrap_or(&self.settings.default_commit_message);

        let mut steps = StepSequence::new(self.runner);
        steps
            .run_all([
                self.git.add_all(&path),
                self.git.commit(&path, message),
                self.git.push(&path),
            ])
            .await?;

        info!("uploaded {}", repository.name);

        Ok(Uploaded {
            repository,
            changes,
            report: steps.finish(),
        })
    }
}
