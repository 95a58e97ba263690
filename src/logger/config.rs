use crate::domain::{FatalLevel, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Construction-time settings for a [`crate::Logger`].
///
/// Validation applies only at construction; the runtime setters never
/// raise and silently keep the previous value instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Master switch. When false, every operation is an inert no-op.
    pub activate: bool,

    /// Entries at or below this level are eligible for immediate output.
    pub threshold: Severity,

    /// Framed-flush trigger; `Disabled` also turns off accumulation.
    pub fatal_threshold: FatalLevel,

    /// Force every accepted entry into the buffer instead of rendering.
    pub skip_all: bool,

    /// Process id tag rendered into every line.
    pub pid: Option<String>,

    /// Render the timestamp segment.
    pub show_time: bool,

    /// Whether a filtered replay consumes the buffer. Defaults to false:
    /// filtered replays leave the buffer in place.
    pub clear_on_filtered_replay: bool,

    /// Base directory of the file sink.
    pub log_dir: PathBuf,

    /// File name of the file sink, without the `.log` extension.
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            activate: true,
            threshold: Severity::Warn,
            fatal_threshold: FatalLevel::At(Severity::Error),
            skip_all: false,
            pid: None,
            show_time: true,
            clear_on_filtered_replay: false,
            log_dir: PathBuf::from("_tmp"),
            file_name: "logger".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let FatalLevel::At(fatal) = self.fatal_threshold
            && fatal >= self.threshold
        {
            return Err(ConfigError::InvalidConfig(format!(
                "Fatal threshold ({fatal}) must be more severe than the threshold ({})",
                self.threshold
            )));
        }

        if self.file_name.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "File name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn fatal_threshold_must_outrank_threshold() {
        let config = Config {
            threshold: Severity::Warn,
            fatal_threshold: FatalLevel::At(Severity::Warn),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn disabled_fatal_threshold_validates_at_any_threshold() {
        let config = Config {
            threshold: Severity::System,
            fatal_threshold: FatalLevel::Disabled,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_name_is_rejected() {
        let config = Config {
            file_name: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
