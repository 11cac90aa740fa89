use inquire::error::InquireError;
use inquire::{Confirm, Select, Text};

/// Why a question got no answer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("cancelled")]
    Cancelled,

    #[error("prompt failed: {0}")]
    Failed(String),
}

impl From<InquireError> for PromptError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Cancelled
            }
            other => PromptError::Failed(other.to_string()),
        }
    }
}

/// Asks a human to choose.
///
/// Workflows only depend on this contract so they can be driven by a scripted
/// implementation in tests.
pub trait SelectionPort {
    /// Present `items` and return the index of the chosen one
    fn select_one(&self, label: &str, items: &[String]) -> Result<usize, PromptError>;

    fn confirm(&self, label: &str) -> Result<bool, PromptError>;

    /// Free text answer, falling back to `default` on empty input
    fn input(&self, label: &str, default: &str) -> Result<String, PromptError>;
}

/// Terminal prompts backed by `inquire`
#[derive(Debug, Clone)]
pub struct TerminalPrompter {
    page_size: usize,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionPort for TerminalPrompter {
    fn select_one(&self, label: &str, items: &[String]) -> Result<usize, PromptError> {
        if items.is_empty() {
            return Err(PromptError::Failed(format!("nothing to choose for: {label}")));
        }

        // Index-carrying options keep duplicate labels distinguishable
        let options: Vec<Choice> = items
            .iter()
            .enumerate()
            .map(|(index, label)| Choice {
                index,
                label: label.clone(),
            })
            .collect();

        let choice = Select::new(label, options)
            .with_page_size(self.page_size)
            .prompt()?;

        Ok(choice.index)
    }

    fn confirm(&self, label: &str) -> Result<bool, PromptError> {
        Ok(Confirm::new(label).with_default(false).prompt()?)
    }

    fn input(&self, label: &str, default: &str) -> Result<String, PromptError> {
        let answer = Text::new(label).with_default(default).prompt()?;
        let answer = answer.trim();

        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

struct Choice {
    index: usize,
    label: String,
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
