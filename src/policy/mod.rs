//! Per-call acceptance decisions.
//!
//! `LevelPolicy` holds the configured thresholds and the global skip flag
//! and answers, per log call, whether a message is processed immediately,
//! stashed in the pending buffer, or dropped. Pure decision functions,
//! no I/O.

use crate::domain::{FatalLevel, Severity};
use serde::{Deserialize, Serialize};

/// Outcome of the acceptance check for one log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// At or below the threshold: eligible for immediate processing.
    Process,
    /// Over the threshold: stash silently for a later flush.
    BufferOnly,
    /// Over the threshold while accumulation is disabled: discard.
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPolicy {
    threshold: Severity,
    fatal: FatalLevel,
    skip_all: bool,
}

impl LevelPolicy {
    pub fn new(threshold: Severity, fatal: FatalLevel, skip_all: bool) -> Self {
        Self {
            threshold,
            fatal,
            skip_all,
        }
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn fatal(&self) -> FatalLevel {
        self.fatal
    }

    pub fn skip_all(&self) -> bool {
        self.skip_all
    }

    pub fn set_threshold(&mut self, level: Severity) {
        self.threshold = level;
    }

    /// Update the fatal threshold. A level value must be strictly more
    /// severe than the processing threshold; returns false and keeps the
    /// previous value otherwise. `Disabled` is always accepted.
    pub fn set_fatal(&mut self, fatal: FatalLevel) -> bool {
        if let FatalLevel::At(level) = fatal
            && level >= self.threshold
        {
            return false;
        }
        self.fatal = fatal;
        true
    }

    pub fn set_skip_all(&mut self, skip: bool) {
        self.skip_all = skip;
    }

    pub fn accept(&self, level: Severity) -> Decision {
        if level > self.threshold {
            if self.fatal.is_disabled() {
                Decision::Drop
            } else {
                Decision::BufferOnly
            }
        } else {
            Decision::Process
        }
    }

    /// Global skip flag OR the per-entry skip option.
    pub fn effective_skip(&self, entry_skip: bool) -> bool {
        self.skip_all || entry_skip
    }

    /// Whether `level` is severe enough to trigger a framed flush.
    pub fn is_fatal(&self, level: Severity) -> bool {
        self.fatal.covers(level)
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::new(Severity::Warn, FatalLevel::default(), false)
    }
}
