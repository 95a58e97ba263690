//! Internal diagnostics bootstrap.
//!
//! The crate reports its own operational events (ignored configuration
//! values, directory creation, flush decisions) through `tracing`. Embedding
//! applications that want those events on stderr can install this
//! subscriber; applications with their own subscriber can skip it.

use std::sync::{Mutex, Once};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum DiagnosticsError {
    #[error("Failed to initialize diagnostics: {0}")]
    InitFailed(String),
}

/// Install a global `tracing` subscriber for this crate's diagnostics.
///
/// Honors `RUST_LOG`; without it, only `warn` and above from this crate
/// surface. Safe to call more than once: only the first call installs,
/// later calls return the first outcome.
pub fn init_diagnostics() -> Result<(), DiagnosticsError> {
    static INIT: Once = Once::new();
    static OUTCOME: Mutex<Option<String>> = Mutex::new(None);

    INIT.call_once(|| {
        if let Err(error) = try_init() {
            if let Ok(mut outcome) = OUTCOME.lock() {
                *outcome = Some(error.to_string());
            }
        }
    });

    match OUTCOME.lock() {
        Ok(outcome) => match outcome.as_ref() {
            Some(message) => Err(DiagnosticsError::InitFailed(message.clone())),
            None => Ok(()),
        },
        Err(_) => Err(DiagnosticsError::InitFailed(
            "diagnostics state poisoned".to_string(),
        )),
    }
}

fn try_init() -> Result<(), DiagnosticsError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(concat!(env!("CARGO_PKG_NAME"), "=warn")))
        .map_err(|error| DiagnosticsError::InitFailed(error.to_string()))?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| DiagnosticsError::InitFailed(error.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_stable() {
        let first = init_diagnostics();
        let second = init_diagnostics();
        // Another subscriber may already be installed by the test harness;
        // either way the two calls must agree.
        assert_eq!(first.is_ok(), second.is_ok());
    }
}
