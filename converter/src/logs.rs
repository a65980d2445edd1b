//! Console logging for the conversion run.
//!
//! Progress goes to stderr so stdout stays free for piping. Entries can be
//! rendered as prefixed text lines or as one JSON object per line.

use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Human-readable line with level prefix.
    pub fn to_text(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "  ",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠ ",
            LogLevel::Error => "✗ ",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{}{}", indent, prefix, self.message)
    }
}

/// How entries are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Global console logger
pub static CONSOLE: Lazy<ConsoleLog> = Lazy::new(ConsoleLog::new);

/// Writes entries to stderr according to the configured format.
pub struct ConsoleLog {
    quiet: AtomicBool,
    json: AtomicBool,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self {
            quiet: AtomicBool::new(false),
            json: AtomicBool::new(false),
        }
    }

    /// Set verbosity and format for the rest of the run.
    pub fn configure(&self, quiet: bool, format: LogFormat) {
        self.quiet.store(quiet, Ordering::Relaxed);
        self.json.store(format == LogFormat::Json, Ordering::Relaxed);
    }

    /// The line that would be written for `entry`, if any.
    ///
    /// Quiet mode keeps only warnings and errors.
    pub fn render(&self, entry: &LogEntry) -> Option<String> {
        let quiet = self.quiet.load(Ordering::Relaxed);
        if quiet && matches!(entry.level, LogLevel::Info | LogLevel::Success) {
            return None;
        }

        if self.json.load(Ordering::Relaxed) {
            serde_json::to_string(entry).ok()
        } else {
            Some(entry.to_text())
        }
    }

    pub fn log(&self, entry: LogEntry) {
        if let Some(line) = self.render(&entry) {
            eprintln!("{}", line);
        }
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    CONSOLE.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    CONSOLE.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    CONSOLE.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    CONSOLE.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    CONSOLE.log(LogEntry::info(msg).with_indent(indent));
}
