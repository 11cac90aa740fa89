//! User-facing output and log setup
//!
//! Display output (step results, summaries) goes to stdout and can be
//! silenced with quiet mode; tracing logs always go to stderr.

mod config;
mod display;
#[doc(hidden)]
pub mod writer;

pub use config::{OutputConfig, OutputMode};

use once_cell::sync::OnceCell;

static OUTPUT_CONFIG: OnceCell<OutputConfig> = OnceCell::new();

/// Initialize the output system with the specified mode and verbosity.
/// Only the first call takes effect.
pub fn init_with_verbosity(mode: OutputMode, verbose: bool) {
    let mut config = OutputConfig::new(mode);
    if verbose {
        config.set_verbose();
    }

    config.init_tracing();

    let _ = OUTPUT_CONFIG.set(config);
}

/// Get current output mode, `Normal` until initialized
pub fn current_mode() -> OutputMode {
    OUTPUT_CONFIG
        .get()
        .map(OutputConfig::mode)
        .unwrap_or(OutputMode::Normal)
}
