//! Rendering of command results
//!
//! Commands hand their results to the [`Formatter`], which prints either
//! listing lines and status messages or one JSON document per command.

use ncs_core::{Error, ObjectInfo, UploadOutput};
use serde::Serialize;

use super::OutputConfig;
use crate::exit_code::ExitCode;

/// Width of the `[date]` column when a listing entry has no timestamp
const DATE_WIDTH: usize = 19;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Failure,
}

impl Tone {
    fn mark(self, colored: bool) -> &'static str {
        match (self, colored) {
            (Self::Success, true) => "\x1b[32m✓\x1b[0m",
            (Self::Warning, true) => "\x1b[33m⚠\x1b[0m",
            (Self::Failure, true) => "\x1b[31m✗\x1b[0m",
            (Self::Success, false) => "✓",
            (Self::Warning, false) => "⚠",
            (Self::Failure, false) => "✗",
        }
    }
}

#[derive(Serialize)]
struct ErrorOutput<'a> {
    error: &'a str,
    exit_code: i32,
}

/// Prints command results in the configured mode
///
/// Results go to stdout, warnings and failures to stderr. In JSON mode only
/// JSON is written and human status lines are dropped.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Output configuration this formatter was built from
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    fn colored(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    fn human(&self) -> bool {
        !self.config.quiet && !self.config.json
    }

    /// Print a completed action, e.g. a removed bucket
    pub fn success(&self, message: &str) {
        if self.human() {
            println!("{} {message}", Tone::Success.mark(self.colored()));
        }
    }

    /// Print a hint on stderr
    pub fn warning(&self, message: &str) {
        if self.human() {
            eprintln!("{} {message}", Tone::Warning.mark(self.colored()));
        }
    }

    /// Report a failed command; printed even in quiet mode
    pub fn failure(&self, err: &Error, code: ExitCode) {
        let message = err.to_string();
        if self.config.json {
            let output = ErrorOutput {
                error: &message,
                exit_code: code.as_i32(),
            };
            match serde_json::to_string_pretty(&output) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{message}"),
            }
        } else {
            eprintln!("{} {message}", Tone::Failure.mark(self.colored()));
        }
    }

    /// Print one line of a bucket or object listing
    pub fn entry(&self, info: &ObjectInfo) {
        self.println(&entry_line(info));
    }

    /// Print the human summary of an upload
    pub fn uploaded(&self, source: &str, output: &UploadOutput) {
        let size = humansize::format_size(output.size_bytes, humansize::BINARY);
        self.success(&format!(
            "{source} -> {}/{} ({size})",
            output.bucket, output.key
        ));
        for line in upload_details(output) {
            self.println(&line);
        }
    }

    /// Print a value as pretty JSON on stdout
    pub fn json<T: Serialize>(&self, value: &T) {
        if self.config.quiet {
            return;
        }
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a plain line unless quiet
    pub fn println(&self, message: &str) {
        if !self.config.quiet {
            println!("{message}");
        }
    }
}

/// `[date] size key` for objects, `[date] 0B name/` for buckets
fn entry_line(info: &ObjectInfo) -> String {
    let date = info
        .last_modified
        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| " ".repeat(DATE_WIDTH));

    if info.is_bucket {
        format!("[{date}] {:>9} {}/", "0B", info.key)
    } else {
        let size = info.size_human.as_deref().unwrap_or("0 B");
        format!("[{date}] {size:>9} {}", info.key)
    }
}

fn upload_details(output: &UploadOutput) -> Vec<String> {
    let mut lines = vec![format!("Location: {}", output.location)];
    if let Some(etag) = &output.etag {
        lines.push(format!("ETag: {etag}"));
    }
    if let Some(upload_id) = &output.upload_id {
        lines.push(format!("Upload ID: {upload_id} ({} parts)", output.parts));
    }
    lines
}
