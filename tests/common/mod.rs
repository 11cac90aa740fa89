//! Scripted collaborators for driving workflows without git or a terminal

#![allow(dead_code)]

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use logics::registry::{Registry, Repository};
use logics::ui::{PromptError, SelectionPort};
use logics::vcs::{CommandRunner, ExecError};
use logics::workflow::Settings;

/// Records every invocation and answers from a list of rules.
///
/// A rule matches when the space-joined argument list contains its needle;
/// the first matching rule wins and unmatched calls succeed with no output.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<(String, Result<String, ExecError>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, needle: &str, outcome: Result<&str, ExecError>) -> Self {
        self.rules
            .push((needle.to_string(), outcome.map(|s| s.to_string())));
        self
    }

    /// Command lines seen so far, `program arg arg ...`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls with the `-C <path>` prefix removed, e.g. `git push origin master`
    pub fn verbs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|line| {
                let parts: Vec<&str> = line.split(' ').collect();
                if parts.get(1) == Some(&"-C") {
                    let mut kept = vec![parts[0]];
                    kept.extend(&parts[3..]);
                    kept.join(" ")
                } else {
                    line
                }
            })
            .collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, ExecError> {
        let joined = args.join(" ");
        self.calls
            .lock()
            .unwrap()
            .push(format!("{program} {joined}"));

        self.rules
            .iter()
            .find(|(needle, _)| joined.contains(needle.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Ok(String::new()))
    }
}

/// Answers questions from pre-recorded queues; an unexpected question fails
#[derive(Default)]
pub struct ScriptedPrompt {
    selections: RefCell<VecDeque<Result<usize, PromptError>>>,
    confirms: RefCell<VecDeque<bool>>,
    inputs: RefCell<VecDeque<String>>,
    pub offered: RefCell<Vec<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(self, index: usize) -> Self {
        self.selections.borrow_mut().push_back(Ok(index));
        self
    }

    pub fn cancel(self) -> Self {
        self.selections
            .borrow_mut()
            .push_back(Err(PromptError::Cancelled));
        self
    }

    pub fn confirm_with(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn answer(self, text: &str) -> Self {
        self.inputs.borrow_mut().push_back(text.to_string());
        self
    }
}

impl SelectionPort for ScriptedPrompt {
    fn select_one(&self, label: &str, items: &[String]) -> Result<usize, PromptError> {
        self.offered.borrow_mut().push(items.to_vec());
        self.selections
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(PromptError::Failed(format!("unexpected selection: {label}"))))
    }

    fn confirm(&self, label: &str) -> Result<bool, PromptError> {
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PromptError::Failed(format!("unexpected confirmation: {label}")))
    }

    fn input(&self, label: &str, _default: &str) -> Result<String, PromptError> {
        self.inputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PromptError::Failed(format!("unexpected input: {label}")))
    }
}

/// A shared folder, a project folder and a registry file in a temp dir
pub struct Fixture {
    pub dir: TempDir,
    pub shared: PathBuf,
    pub projects: PathBuf,
    pub settings: Settings,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("Dropbox").join("logic");
        let projects = dir.path().join("Music").join("Logic");
        fs::create_dir_all(&shared).unwrap();
        fs::create_dir_all(&projects).unwrap();

        let settings = Settings::default()
            .with_registry_path(dir.path().join(".logics.yml"))
            .with_step_timeout_secs(0);

        Self {
            dir,
            shared,
            projects,
            settings,
        }
    }

    pub fn registry_path(&self) -> &Path {
        &self.settings.registry_path
    }

    /// Write a registry holding `repos`
    pub async fn with_registry(self, repos: Vec<Repository>) -> Self {
        let mut registry = Registry::new(&self.shared, &self.projects);
        for repo in repos {
            registry.append(repo);
        }
        registry.save_to_file(self.registry_path()).await.unwrap();
        self
    }

    /// Create `<shared>/<name>` looking like a git checkout
    pub fn share_project(&self, name: &str) -> PathBuf {
        let dir = self.shared.join(name);
        fs::create_dir_all(dir.join(".git")).unwrap();
        dir
    }

    pub fn registry_bytes(&self) -> Vec<u8> {
        fs::read(self.registry_path()).unwrap()
    }

    pub async fn registry(&self) -> Registry {
        Registry::load_from_file(self.registry_path()).await.unwrap()
    }
}

pub fn runtime(stderr: &str) -> ExecError {
    ExecError::Runtime {
        stderr: stderr.to_string(),
    }
}
