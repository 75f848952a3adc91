//! Structured JSON logging for rollbook
//!
//! One log line = one event. Lines are single-object JSON with a fixed
//! leading key order (`ts`, `level`, `event`) followed by caller fields in
//! alphabetical order, so identical events always serialize identically.
//! Writes are synchronous and unbuffered; a failed write is dropped rather
//! than surfaced, since logging must never interrupt a batch.

use std::fmt;
use std::io::{self, Write};

use chrono::{SecondsFormat, Utc};

/// Log levels, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Diagnostic detail.
    Debug = 0,
    /// Normal operations.
    Info = 1,
    /// Recoverable issues (a rejected row, a retry scheduled).
    Warn = 2,
    /// Operation failures.
    Error = 3,
}

impl Level {
    /// Returns the level name string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger.
///
/// `Debug` and `Info` go to stdout, `Warn` and `Error` to stderr.
pub struct Logger;

impl Logger {
    /// Log an event with the given level and fields.
    pub fn log(level: Level, event: &str, fields: &[(&str, &str)]) {
        match level {
            Level::Debug | Level::Info => {
                Self::write_line(level, event, fields, &mut io::stdout())
            }
            Level::Warn | Level::Error => {
                Self::write_line(level, event, fields, &mut io::stderr())
            }
        }
    }

    /// Log at DEBUG level.
    pub fn debug(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Debug, event, fields);
    }

    /// Log at INFO level.
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Info, event, fields);
    }

    /// Log at WARN level.
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Warn, event, fields);
    }

    /// Log at ERROR level.
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Level::Error, event, fields);
    }

    /// Writes one event to the given writer.
    fn write_line<W: Write>(level: Level, event: &str, fields: &[(&str, &str)], writer: &mut W) {
        let mut line = String::with_capacity(256);

        line.push_str("{\"ts\":\"");
        line.push_str(&Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        line.push_str("\",\"level\":\"");
        line.push_str(level.as_str());
        line.push_str("\",\"event\":\"");
        Self::escape_json_string(&mut line, event);
        line.push('"');

        // Alphabetical field order keeps output deterministic.
        let mut sorted: Vec<_> = fields.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);

        for (key, value) in sorted {
            line.push_str(",\"");
            Self::escape_json_string(&mut line, key);
            line.push_str("\":\"");
            Self::escape_json_string(&mut line, value);
            line.push('"');
        }

        line.push('}');
        line.push('\n');

        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Escape special characters for JSON strings.
    fn escape_json_string(out: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() => {
                    out.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => out.push(c),
            }
        }
    }
}

/// Render one event to a string, for assertions.
#[cfg(test)]
pub fn capture(level: Level, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::write_line(level, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
