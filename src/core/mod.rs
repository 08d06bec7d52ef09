//! Core state machine types and logic.
//!
//! This module contains the pure core of the engine:
//! - Machine definitions (states, transitions, action items)
//! - Guard evaluation and event normalization
//! - Flat-topology validation
//! - The [`Machine`] transition function
//!
//! Nothing in this module runs actions or mutates a service. Only guard
//! functions are ever invoked.

mod action;
mod definition;
mod error;
pub(crate) mod event;
mod guard;
mod machine;
mod state;
mod validation;
mod value;

pub use action::{
    is_assign_type, ActionItem, ActionList, ActionOptions, ActionTable, AssignMap, AssignSource,
    AssignValue, ASSIGN_TYPES,
};
pub use definition::{MachineDefinition, OnSpec, StateName, StateNode, TransitionSpec};
pub use error::{DefinitionError, FsmError, InputError};
pub use event::{event_type, normalize_event, INIT_EVENT};
pub use guard::Guard;
pub use machine::{Machine, StateRef};
pub use state::StateObject;
pub use validation::{find_nested_state, validate_flat};
pub use value::{kind_name, truthy, CallError, Callable};

pub(crate) use action::lookup;
pub(crate) use value::ensure_object;
