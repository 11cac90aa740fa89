use std::io;
use std::path::PathBuf;

use crate::registry::RegistryError;
use crate::ui::PromptError;
use crate::vcs::{ExecError, WorkflowStep};

/// Why a workflow stopped
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A step failed; the steps listed in `completed` already took effect.
    #[error("{} failed: {source}", .step.purpose)]
    Step {
        step: WorkflowStep,
        completed: Vec<WorkflowStep>,
        source: ExecError,
    },

    #[error("cancelled")]
    Cancelled,

    /// A precondition failed before any command ran
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Every step succeeded but the registry could not be written back
    #[error("{source} (the project was installed but is not registered yet)")]
    Persist {
        completed: Vec<WorkflowStep>,
        source: RegistryError,
    },

    #[error("Failed to prepare {}: {source}", .path.display())]
    Filesystem { path: PathBuf, source: io::Error },

    #[error("{0}")]
    Prompt(String),
}

impl WorkflowError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WorkflowError::Cancelled)
    }

    /// Steps whose effects remain on disk after this failure
    pub fn completed_steps(&self) -> &[WorkflowStep] {
        match self {
            WorkflowError::Step { completed, .. } | WorkflowError::Persist { completed, .. } => {
                completed
            }
            _ => &[],
        }
    }
}

impl From<PromptError> for WorkflowError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Cancelled => WorkflowError::Cancelled,
            PromptError::Failed(message) => WorkflowError::Prompt(message),
        }
    }
}
