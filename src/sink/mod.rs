//! Output sinks.
//!
//! A sink receives the fully rendered text blob of one flush. The core
//! treats sinks as opaque injected capabilities; file I/O failures are not
//! caught here and propagate to the caller of the triggering operation.

mod callback;
mod console;
mod file;

pub use callback::{CallbackSink, SinkFn};
pub use console::ConsoleSink;
pub use file::{FileSink, sanitize_subdir};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to append to log file {path}: {source}")]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Console write failed: {0}")]
    Console(#[from] std::io::Error),
}

/// A destination for rendered log text. One `write` per flush.
pub trait Sink {
    fn write(&mut self, text: &str) -> Result<(), SinkError>;
}

/// The kind of sink currently active on a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Console,
    File,
    Callback,
}
