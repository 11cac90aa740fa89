use std::time::Duration;

/// Classified failure of an external command.
///
/// Every expected way a spawned program can fail maps to exactly one variant,
/// so callers can tell "tool missing" apart from "tool said no".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    /// The program could not be located or executed at all.
    #[error("command `{program}` not found. Please install it")]
    NotFound { program: String, reason: String },

    /// The program ran, failed, and explained itself on stderr.
    #[error("{stderr}")]
    Runtime { stderr: String },

    /// The program ran and failed without a usable status or stderr.
    #[error("{message}")]
    Unexpected { message: String },

    /// The program did not finish within the configured step timeout.
    #[error("command `{program}` did not finish within {}s", .after.as_secs())]
    TimedOut { program: String, after: Duration },
}

impl ExecError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExecError::NotFound { .. })
    }

    /// Short classification label used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            ExecError::NotFound { .. } => "not-found",
            ExecError::Runtime { .. } => "runtime",
            ExecError::Unexpected { .. } => "unexpected",
            ExecError::TimedOut { .. } => "timed-out",
        }
    }
}
