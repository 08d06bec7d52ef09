//! Error taxonomy for machine and service operations.
//!
//! "No transition" is not an error: operations signal it with `Ok(None)`.

use super::value::CallError;
use thiserror::Error;

/// Malformed machine definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("Initial state '{initial}' is not defined in states")]
    UnknownInitialState { initial: String },
}

/// Wrong value kind passed to a public operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("Event must be a string or an object, got {kind}")]
    InvalidEvent { kind: &'static str },
}

/// Errors returned by [`Machine`](super::Machine) and
/// [`Service`](crate::interpreter::Service) operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FsmError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Guard for '{event}' in state '{state}' failed: {source}")]
    Guard {
        state: String,
        event: String,
        source: CallError,
    },

    #[error("Action failed: {0}")]
    Action(CallError),

    #[error("Listener {id} failed: {source}")]
    Listener { id: u64, source: CallError },
}
