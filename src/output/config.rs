//! Output configuration and mode management

use console::Term;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// How much user-facing output the binary produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress and step output on stdout, logs on stderr
    Normal,
    /// Only errors; informational display output is dropped
    Quiet,
}

/// Configuration for the output system
#[derive(Debug)]
pub struct OutputConfig {
    mode: OutputMode,
    color_enabled: bool,
    log_level: Level,
}

impl OutputConfig {
    pub fn new(mode: OutputMode) -> Self {
        let color_enabled = Term::stderr().features().colors_supported();

        let log_level = match std::env::var("RUST_LOG") {
            Ok(level) => parse_level(&level).unwrap_or(Level::INFO),
            Err(_) => Level::INFO,
        };

        Self {
            mode,
            color_enabled,
            log_level,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn log_level(&self) -> Level {
        self.log_level
    }

    /// Set verbose mode (DEBUG level)
    pub fn set_verbose(&mut self) {
        self.log_level = Level::DEBUG;
    }

    /// Initialize the tracing subscriber; logs always go to stderr
    pub fn init_tracing(&self) {
        let level = match self.mode {
            OutputMode::Quiet if self.log_level > Level::WARN => Level::WARN,
            _ => self.log_level,
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
            .with_target(false)
            .with_level(true)
            .with_ansi(self.color_enabled)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

fn parse_level(level: &str) -> Option<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some(Level::DEBUG));
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level("logics=debug"), None);
    }

    #[test]
    fn test_verbose_forces_debug() {
        let mut config = OutputConfig::new(OutputMode::Normal);
        config.set_verbose();
        assert_eq!(config.log_level(), Level::DEBUG);
        assert_eq!(config.mode(), OutputMode::Normal);
    }
}
