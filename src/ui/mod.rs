//! Interactive questions asked by the workflows

pub mod prompts;

pub use prompts::{PromptError, SelectionPort, TerminalPrompter};
