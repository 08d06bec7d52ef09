//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading a definition from JSON.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input is not valid JSON or does not have the machine shape.
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),

    /// An `on` entry is neither a string, an object nor a list.
    #[error("Transition for '{event}' in state '{state}' must be a string, object or array, got {kind}")]
    InvalidTransition {
        state: String,
        event: String,
        kind: &'static str,
    },

    /// A `cond` is not a guard name. Guard functions are attached by name.
    #[error("Guard for '{event}' in state '{state}' must be a name, got {kind}")]
    InvalidGuard {
        state: String,
        event: String,
        kind: &'static str,
    },
}
