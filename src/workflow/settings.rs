use std::path::PathBuf;
use std::time::Duration;

use crate::registry::constants::get_default_registry_path;
use crate::vcs::GitCommands;

/// Commit message used by `upload` when none is given
pub const DEFAULT_COMMIT_MESSAGE: &str = "committing work on Logic";

/// Per-step wait limit applied unless overridden
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Configuration for one invocation.
///
/// Built once at startup and handed to every workflow by reference; nothing
/// in the workflows reads process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Version-control executable
    pub vcs_program: String,
    pub registry_path: PathBuf,
    /// Program git-lfs launches as the folder-based transfer agent
    pub transfer_agent: String,
    pub remote: String,
    pub branch: String,
    pub default_commit_message: String,
    pub step_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vcs_program: "git".to_string(),
            registry_path: get_default_registry_path(),
            transfer_agent: "lfs-folderstore".to_string(),
            remote: "origin".to_string(),
            branch: "master".to_string(),
            default_commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            step_timeout: Some(DEFAULT_STEP_TIMEOUT),
        }
    }
}

impl Settings {
    pub fn with_registry_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.registry_path = path.into();
        self
    }

    /// Seconds from the command line; zero disables the limit
    pub fn with_step_timeout_secs(mut self, secs: u64) -> Self {
        self.step_timeout = if secs == 0 {
            None
        } else {
            Some(Duration::from_secs(secs))
        };
        self
    }

    pub fn git(&self) -> GitCommands {
        GitCommands::new(
            &self.vcs_program,
            &self.remote,
            &self.branch,
            &self.transfer_agent,
        )
    }
}
