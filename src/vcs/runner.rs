use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use super::error::ExecError;
use super::steps::WorkflowStep;

/// Executes external programs and classifies how they failed.
///
/// Implementations must never panic on an expected failure mode: a missing
/// program, a non-zero exit and a hung child all come back as [`ExecError`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, returning its captured stdout on success.
    async fn run(&self, program: &str, args: &[String]) -> Result<String, ExecError>;

    /// Run a prepared workflow step.
    async fn run_step(&self, step: &WorkflowStep) -> Result<String, ExecError> {
        self.run(&step.program, &step.args).await
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every spawned command by `timeout`; `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, ExecError> {
        Self::run_with_limit(program, args, self.timeout).await
    }

    async fn run_step(&self, step: &WorkflowStep) -> Result<String, ExecError> {
        let limit = if step.bounded { self.timeout } else { None };
        Self::run_with_limit(&step.program, &step.args, limit).await
    }
}

impl ProcessRunner {
    async fn run_with_limit(
        program: &str,
        args: &[String],
        limit: Option<Duration>,
    ) -> Result<String, ExecError> {
        debug!("running cmd: `{} {}`", program, args.join(" "));

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out step drops the child future, which must take the process with it
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                debug!("failed to spawn `{}`: {}", program, e);
                ExecError::NotFound {
                    program: program.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let waited = match limit {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    debug!("`{}` exceeded the {:?} step timeout", program, limit);
                    return Err(ExecError::TimedOut {
                        program: program.to_string(),
                        after: limit,
                    });
                }
            },
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(|e| ExecError::Unexpected {
            message: e.to_string(),
        })?;

        classify_output(program, output)
    }
}

/// Map a finished process onto stdout or a classified failure.
pub fn classify_output(program: &str, output: Output) -> Result<String, ExecError> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    debug!("`{}` exited with {}", program, output.status);

    if !output.stderr.is_empty() {
        return Err(ExecError::Runtime {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Err(ExecError::Unexpected {
        message: output.status.to_string(),
    })
}
