use thiserror::Error;

/// Top-level error type for logger operations.
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::logger::ConfigError),

    #[error("Sink error: {0}")]
    Sink(#[from] crate::sink::SinkError),
}

/// Raw severity value outside the fixed 0..=6 table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown severity value: {0}")]
pub struct UnknownSeverity(pub u8);
