//! Workflow steps as plain data
//!
//! A step is the program, its arguments and a human readable purpose. Building
//! them is kept apart from running them so the exact git command lines can be
//! logged, reported and asserted on without spawning anything.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Name of the custom large-file transfer agent configured on every clone
pub const TRANSFER_NAME: &str = "lfs-folder";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowStep {
    pub program: String,
    pub args: Vec<String>,
    pub purpose: String,
    /// Whether the runner's per-step timeout applies
    pub bounded: bool,
}

impl WorkflowStep {
    pub fn new<P, I, S>(program: P, args: I, purpose: &str) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            purpose: purpose.to_string(),
            bounded: true,
        }
    }

    /// Exempt this step from the per-step timeout
    pub fn unbounded(mut self) -> Self {
        self.bounded = false;
        self
    }

    /// The command line as it would be typed in a shell
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push_str(&format!("\"{arg}\""));
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (`{}`)", self.purpose, self.command_line())
    }
}

/// Builds the git invocations used by the workflows.
#[derive(Debug, Clone)]
pub struct GitCommands {
    program: String,
    remote: String,
    branch: String,
    transfer_agent: String,
}

impl GitCommands {
    pub fn new(program: &str, remote: &str, branch: &str, transfer_agent: &str) -> Self {
        Self {
            program: program.to_string(),
            remote: remote.to_string(),
            branch: branch.to_string(),
            transfer_agent: transfer_agent.to_string(),
        }
    }

    fn in_repo(&self, repo: &Path, args: &[&str], purpose: &str) -> WorkflowStep {
        let mut full = vec!["-C".to_string(), path_arg(repo)];
        full.extend(args.iter().map(|a| a.to_string()));
        WorkflowStep::new(self.program.as_str(), full, purpose)
    }

    pub fn version(&self) -> WorkflowStep {
        WorkflowStep::new(self.program.as_str(), ["--version"], "check git installation")
    }

    pub fn lfs_install(&self) -> WorkflowStep {
        WorkflowStep::new(
            self.program.as_str(),
            ["lfs", "install"],
            "register git-lfs filters",
        )
    }

    pub fn clone_repo(&self, remote: &Path, local: &Path) -> WorkflowStep {
        WorkflowStep::new(
            self.program.as_str(),
            ["clone".to_string(), path_arg(remote), path_arg(local)],
            "clone the shared project",
        )
        // Copies every large file out of the shared folder
        .unbounded()
    }

    /// The three configuration steps pointing the clone's large-file
    /// transport at the shared folder.
    pub fn configure_transfer(&self, local: &Path, remote: &Path) -> Vec<WorkflowStep> {
        let path_key = format!("lfs.customtransfer.{TRANSFER_NAME}.path");
        let args_key = format!("lfs.customtransfer.{TRANSFER_NAME}.args");
        let remote = path_arg(remote);

        vec![
            self.in_repo(
                local,
                &["config", "--add", &path_key, &self.transfer_agent],
                "configure large-file transport path",
            ),
            self.in_repo(
                local,
                &["config", "--add", &args_key, &remote],
                "configure large-file transport arguments",
            ),
            self.in_repo(
                local,
                &["config", "--add", "lfs.standalonetransferagent", TRANSFER_NAME],
                "select the standalone transfer agent",
            ),
        ]
    }

    pub fn reset_hard(&self, local: &Path) -> WorkflowStep {
        self.in_repo(
            local,
            &["reset", "--hard", &self.branch],
            "reset working copy to the shared tip",
        )
    }

    pub fn pull(&self, local: &Path) -> WorkflowStep {
        self.in_repo(
            local,
            &["pull", &self.remote, &self.branch],
            "pull remote changes",
        )
    }

    pub fn lfs_pull(&self, local: &Path) -> WorkflowStep {
        self.in_repo(local, &["lfs", "pull"], "fetch large-file content")
    }

    pub fn status_porcelain(&self, local: &Path) -> WorkflowStep {
        self.in_repo(local, &["status", "--porcelain"], "detect local changes")
    }

    pub fn add_all(&self, local: &Path) -> WorkflowStep {
        self.in_repo(local, &["add", "-A", "."], "stage all changes")
    }

    pub fn commit(&self, local: &Path, message: &str) -> WorkflowStep {
        self.in_repo(local, &["commit", "-m", message], "commit changes")
    }

    pub fn push(&self, local: &Path) -> WorkflowStep {
        self.in_repo(
            local,
            &["push", &self.remote, &self.branch],
            "push to the shared folder",
        )
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
