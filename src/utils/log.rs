// src/utils/log.rs

//! Operator-facing console output with server-style formatting.
//!
//! Diagnostics go through the `log` facade; this module is for the lines an
//! operator reads (results, verification verdicts, summaries). Components
//! receive a [`Reporter`] instead of printing directly.

use chrono::Local;

/// Log level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    /// Per-movie results and verdicts; shown even when progress is hidden
    Result,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Result => "RESULT",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Sink for operator-facing messages.
pub trait Reporter {
    fn emit(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message);
    }

    fn result(&self, message: &str) {
        self.emit(LogLevel::Result, message);
    }

    fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message);
    }

    /// Log a sub-item (indented)
    fn sub_item(&self, message: &str) {
        self.emit(LogLevel::Info, &format!("    {}", message));
    }

    /// Log a header
    fn header(&self, title: &str) {
        let border = "═".repeat(60);
        self.emit(LogLevel::Info, &border);
        self.emit(LogLevel::Info, &format!("  {}", title));
        self.emit(LogLevel::Info, &border);
    }

    /// Log a summary section
    fn summary(&self, title: &str, items: &[(&str, String)]) {
        self.emit(LogLevel::Info, &format!("[SUMMARY] {}", title));
        for (key, value) in items {
            self.emit(LogLevel::Info, &format!("    {}: {}", key, value));
        }
    }
}

/// Format a log message with timestamp and level
fn format_log(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, level.as_str(), message)
}

/// Writes to stdout (info) and stderr (warnings and errors).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    /// Suppress info lines; warnings and errors are still shown
    pub quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Whether a message at `level` is printed.
    pub fn shows(&self, level: LogLevel) -> bool {
        !(self.quiet && level == LogLevel::Info)
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&self, level: LogLevel, message: &str) {
        if !self.shows(level) {
            return;
        }
        match level {
            LogLevel::Info | LogLevel::Result => println!("{}", format_log(level, message)),
            LogLevel::Warn | LogLevel::Error => eprintln!("{}", format_log(level, message)),
        }
    }
}

/// Keeps every message in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: std::cell::RefCell<Vec<(LogLevel, String)>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, l)| l.contains(needle))
    }

    /// Level of the first line containing `needle`.
    pub fn level_of(&self, needle: &str) -> Option<LogLevel> {
        self.lines
            .borrow()
            .iter()
            .find(|(_, l)| l.contains(needle))
            .map(|(level, _)| *level)
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn emit(&self, level: LogLevel, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}
