#![deny(warnings, rust_2024_compatibility)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. SinkError in sink module
    clippy::must_use_candidate       // Annotated selectively on critical APIs
)]

//! Buffering message logger.
//!
//! Entries at or below the configured severity threshold are rendered
//! immediately; entries above it accumulate in a FIFO pending buffer.
//! A sufficiently severe entry flushes the accumulated context inside a
//! framed banner block, and the buffer can also be replayed on demand.
//! Output goes to an injected sink: console, append-only file, or a
//! registered callback closure.
//!
//! The logger is an explicit value, confined to one thread; there is no
//! global instance. Callers construct a [`Logger`] once and pass it down.

pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod logger;
pub mod policy;
pub mod render;
pub mod sink;

// Re-export main types for easy access
pub use domain::{EntryOptions, FatalLevel, LogEntry, LoggerError, Payload, Severity};
pub use logger::{Config, ConfigError, Logger, SinkSpec};
pub use policy::{Decision, LevelPolicy};
pub use sink::{Sink, SinkError, SinkKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
