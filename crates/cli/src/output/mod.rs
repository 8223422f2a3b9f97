//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats. It also handles progress spinners and colored output.

mod formatter;
mod progress;

use ncs_core::Defaults;

pub use formatter::Formatter;
pub use progress::ProgressBar;

/// Output configuration derived from CLI flags and config file defaults
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable progress spinner
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

impl OutputConfig {
    /// Fill in settings the flags left unset from the config file defaults
    ///
    /// Flags can only switch features on (`--json`) or off (`--no-color`), so a
    /// flag always wins over the file.
    pub fn with_defaults(mut self, defaults: &Defaults) -> Self {
        self.json |= defaults.output.eq_ignore_ascii_case("json");
        self.no_color |= defaults.color.eq_ignore_ascii_case("never");
        self.no_progress |= !defaults.progress;
        self
    }
}
