use super::error::UnknownSeverity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log entry.
///
/// Lower discriminant means higher severity: `Fatal` outranks everything,
/// `System` ranks last. Threshold comparisons throughout the crate use the
/// derived ordering, so `level <= threshold` reads "at least as severe as
/// the threshold".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    Fatal = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
    System = 6,
}

impl Severity {
    /// Number of entries in the severity table.
    pub const COUNT: u8 = 7;

    /// Fixed display-name table.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
            Severity::System => "SYSTEM",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Severity {
    type Error = UnknownSeverity;

    fn try_from(value: u8) -> Result<Self, UnknownSeverity> {
        match value {
            0 => Ok(Severity::Fatal),
            1 => Ok(Severity::Error),
            2 => Ok(Severity::Warn),
            3 => Ok(Severity::Info),
            4 => Ok(Severity::Debug),
            5 => Ok(Severity::Trace),
            6 => Ok(Severity::System),
            other => Err(UnknownSeverity(other)),
        }
    }
}

/// Trigger threshold for framed flushes.
///
/// `At(level)` frames every flush caused by an entry at least as severe as
/// `level`. `Disabled` is the sentinel of the later design variant: framed
/// flushes never happen and over-threshold entries are dropped instead of
/// accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatalLevel {
    At(Severity),
    Disabled,
}

impl FatalLevel {
    pub fn is_disabled(self) -> bool {
        self == FatalLevel::Disabled
    }

    /// Whether `level` is severe enough to trigger a framed flush.
    pub fn covers(self, level: Severity) -> bool {
        match self {
            FatalLevel::At(max) => level <= max,
            FatalLevel::Disabled => false,
        }
    }
}

impl Default for FatalLevel {
    fn default() -> Self {
        FatalLevel::At(Severity::Error)
    }
}

impl From<Severity> for FatalLevel {
    fn from(level: Severity) -> Self {
        FatalLevel::At(level)
    }
}
