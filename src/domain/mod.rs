//! Domain layer for deferlog.
//!
//! Contains the canonical types shared across all modules:
//! - `LogEntry`: one captured log call with its per-call options
//! - `Severity` / `FatalLevel`: the fixed severity table and the framed-flush trigger
//! - `Payload`: message payload with a display conversion contract
//! - `LoggerError`: top-level error type

pub mod error;
pub mod log_entry;
pub mod log_level;

pub use error::{LoggerError, UnknownSeverity};
pub use log_entry::{EntryOptions, LogEntry, Payload, ToDisplayString};
pub use log_level::{FatalLevel, Severity};
