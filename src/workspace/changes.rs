use std::path::Path;
use tracing::debug;

use crate::vcs::{CommandRunner, ExecError, GitCommands, WorkflowStep};

/// Asks git whether a working copy has uncommitted modifications
pub struct ChangeDetector<'a> {
    runner: &'a dyn CommandRunner,
    git: &'a GitCommands,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(runner: &'a dyn CommandRunner, git: &'a GitCommands) -> Self {
        Self { runner, git }
    }

    /// The step used to inspect `path`
    pub fn status_step(&self, path: &Path) -> WorkflowStep {
        self.git.status_porcelain(path)
    }

    /// Raw porcelain summary when there is something to commit, `None` when clean
    pub async fn change_summary(&self, path: &Path) -> Result<Option<String>, ExecError> {
        let out = self.runner.run_step(&self.status_step(path)).await?;

        if out.trim().is_empty() {
            debug!("No changes in {}", path.display());
            Ok(None)
        } else {
            debug!(
                "{} changed entries in {}",
                out.lines().filter(|l| !l.trim().is_empty()).count(),
                path.display()
            );
            Ok(Some(out))
        }
    }

    pub async fn has_changes(&self, path: &Path) -> Result<bool, ExecError> {
        Ok(self.change_summary(path).await?.is_some())
    }
}
