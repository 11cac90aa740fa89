use tracing::{debug, info};

use super::error::WorkflowError;
use super::settings::Settings;
use crate::registry::{Registry, Repository};
use crate::ui::SelectionPort;
use crate::vcs::{CommandRunner, GitCommands};

/// Drives the install, download and upload workflows.
///
/// Owns nothing global: the settings, the command runner and the prompt are
/// all borrowed for the length of one invocation. Callers must not run two
/// instances against the same registry file at the same time.
pub struct Orchestrator<'a> {
    pub(crate) settings: &'a Settings,
    pub(crate) runner: &'a dyn CommandRunner,
    pub(crate) prompt: &'a dyn SelectionPort,
    pub(crate) git: GitCommands,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        settings: &'a Settings,
        runner: &'a dyn CommandRunner,
        prompt: &'a dyn SelectionPort,
    ) -> Self {
        Self {
            settings,
            runner,
            prompt,
            git: settings.git(),
        }
    }

    pub async fn load_registry(&self) -> Result<Registry, WorkflowError> {
        Ok(Registry::load_from_file(&self.settings.registry_path).await?)
    }

    /// Registered repositories in registry order
    pub async fn list(&self) -> Result<Vec<Repository>, WorkflowError> {
        Ok(self.load_registry().await?.repos)
    }

    /// Ask the user to pick one entry of `labels`
    pub(crate) fn select(&self, label: &str, labels: &[String]) -> Result<usize, WorkflowError> {
        debug!("selecting among {} options: {}", labels.len(), label);

        let index = self.prompt.select_one(label, labels)?;
        if index >= labels.len() {
            return Err(WorkflowError::Prompt(format!(
                "selection {index} is out of range ({} options)",
                labels.len()
            )));
        }

        Ok(index)
    }

    /// Ask the user which registered repository to work on
    pub(crate) fn choose_repository(
        &self,
        registry: &Registry,
        label: &str,
    ) -> Result<Repository, WorkflowError> {
        if registry.is_empty() {
            return Err(WorkflowError::Validation(
                "no project installed yet. Run `logics install` first".to_string(),
            ));
        }

        let index = self.select(label, &registry.names())?;
        let repo = registry.repos[index].clone();
        info!("selected {} at {}", repo.name, repo.location.display());
        Ok(repo)
    }
}
