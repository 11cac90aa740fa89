//! logics library
//!
//! Version control for distributed teams that share a folder (Dropbox or
//! similar) as their remote. git does the tracking, git-lfs with a
//! folder-based transfer agent moves the large files; this crate sequences
//! the git invocations and keeps a registry of installed projects.

pub mod output;
pub mod registry;
pub mod ui;
pub mod vcs;
pub mod workflow;
pub mod workspace;

// Re-export commonly used types
pub use registry::{Registry, Repository};
pub use ui::{PromptError, SelectionPort};
pub use vcs::{CommandRunner, ExecError, ProcessRunner, WorkflowStep};
pub use workflow::{Orchestrator, Settings, WorkflowError};
