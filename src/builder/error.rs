//! Build errors for machine definitions.

use thiserror::Error;

/// Errors that can occur when building a machine definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("State '{name}' is defined more than once")]
    DuplicateState { name: String },
}
