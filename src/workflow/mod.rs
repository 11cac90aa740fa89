//! Multi-step workflows: setup, install, download and upload
//!
//! Every workflow is a fixed sequence of steps run strictly in order. The
//! first failing step aborts the rest and is reported with its classified
//! error; steps that already ran are not undone.

mod error;
mod install;
mod orchestrator;
mod report;
mod settings;
mod setup;
mod sync;

pub use error::WorkflowError;
pub use orchestrator::Orchestrator;
pub use report::{Downloaded, Installed, StepOutput, Uploaded, WorkflowReport};
pub use settings::{Settings, DEFAULT_COMMIT_MESSAGE, DEFAULT_STEP_TIMEOUT};
pub use setup::SetupOutcome;
