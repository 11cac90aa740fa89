use console::style;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::WorkflowError;
use crate::display_println;
use crate::registry::Repository;
use crate::vcs::{CommandRunner, WorkflowStep};

/// One executed step and what it printed
#[derive(Debug, Clone, Serialize)]
pub struct StepOutput {
    pub step: WorkflowStep,
    pub stdout: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowReport {
    pub steps: Vec<StepOutput>,
}

impl WorkflowReport {
    pub fn commands(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.step.command_line()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Installed {
    pub repository: Repository,
    pub report: WorkflowReport,
}

#[derive(Debug, Clone)]
pub struct Downloaded {
    pub repository: Repository,
    pub report: WorkflowReport,
}

#[derive(Debug, Clone)]
pub struct Uploaded {
    pub repository: Repository,
    /// Porcelain status summary that was committed
    pub changes: String,
    pub report: WorkflowReport,
}

/// Runs steps strictly in order and stops at the first failure
pub(crate) struct StepSequence<'a> {
    runner: &'a dyn CommandRunner,
    report: WorkflowReport,
}

impl<'a> StepSequence<'a> {
    pub(crate) fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            report: WorkflowReport::default(),
        }
    }

    pub(crate) fn completed(&self) -> Vec<WorkflowStep> {
        self.report.steps.iter().map(|s| s.step.clone()).collect()
    }

    pub(crate) async fn run(&mut self, step: WorkflowStep) -> Result<(), WorkflowError> {
        let index = self.report.steps.len() + 1;
        info!("step {}: {}", index, step.purpose);
        debug!("executing `{}`", step.command_line());

        match self.runner.run_step(&step).await {
            Ok(stdout) => {
                display_println!("{} {}", style("✓").green(), step.purpose);
                if !stdout.trim().is_empty() {
                    display_println!("{}", style(stdout.trim_end()).dim());
                }
                self.report.steps.push(StepOutput { step, stdout });
                Ok(())
            }
            Err(source) => {
                warn!(
                    "step {} ({}) failed as {}; {} earlier steps stay applied",
                    index,
                    step.purpose,
                    source.kind(),
                    self.report.steps.len()
                );
                Err(WorkflowError::Step {
                    completed: self.completed(),
                    step,
                    source,
                })
            }
        }
    }

    pub(crate) async fn run_all<I>(&mut self, steps: I) -> Result<(), WorkflowError>
    where
        I: IntoIterator<Item = WorkflowStep>,
    {
        for step in steps {
            self.run(step).await?;
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> WorkflowReport {
        self.report
    }
}
