//! Entry formatting.
//!
//! Pure text production: one buffered entry in, one formatted line out,
//! plus the banner/closer pair framing a fatal flush. The renderer holds
//! only the instance-wide display toggles (process id tag, timestamp).

use crate::domain::{LogEntry, ToDisplayString};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Output timestamp format, seconds resolution, UTC.
const TIMESTAMP_FORMAT: &str = "[%d-%m-%Y %H:%M:%S]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    pid: Option<String>,
    show_time: bool,
}

impl Renderer {
    /// Closing banner of a framed flush.
    pub const CLOSER: &'static str = "--------------------------\n\n";

    pub fn new() -> Self {
        Self {
            pid: None,
            show_time: true,
        }
    }

    pub fn pid(&self) -> Option<&str> {
        self.pid.as_deref()
    }

    pub fn set_pid(&mut self, pid: String) {
        self.pid = Some(pid);
    }

    pub fn show_time(&self) -> bool {
        self.show_time
    }

    pub fn set_show_time(&mut self, show_time: bool) {
        self.show_time = show_time;
    }

    /// Banner head of a framed flush: epoch seconds plus level name of the
    /// triggering entry.
    pub fn banner(&self, entry: &LogEntry) -> String {
        format!(
            "\n--- {} - [{}] ---\n",
            entry.timestamp.timestamp(),
            entry.level.name()
        )
    }

    /// Format one entry. An entry with an empty payload renders as the
    /// empty string, producing no line at all.
    pub fn render(&self, entry: &LogEntry) -> String {
        if entry.payload.is_empty() {
            return String::new();
        }

        let mut text = entry.payload.to_display_string();
        if let Some((find, replace_with)) = &entry.options.replace {
            text = text.replace(find.as_str(), replace_with.as_str());
        }
        if entry.options.one_line {
            text = WHITESPACE_RUNS.replace_all(&text, " ").into_owned();
        }

        let mut line = String::new();
        if let Some(separator) = &entry.options.separator {
            line.push_str(separator);
        }
        if self.show_time {
            line.push_str(&entry.timestamp.format(TIMESTAMP_FORMAT).to_string());
        }
        if let Some(pid) = &self.pid {
            line.push_str(&format!("[{pid}]\t\t"));
        }
        line.push_str(&format!("[{}] {}\n", entry.level.name(), text));
        line
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
