//! Everything that talks to the external version-control tool

pub mod error;
pub mod runner;
pub mod steps;

pub use error::ExecError;
pub use runner::{CommandRunner, ProcessRunner};
pub use steps::{GitCommands, WorkflowStep};
