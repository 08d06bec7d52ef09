//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders and macros for creating machine
//! definitions with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use state::StateNodeBuilder;
pub use transition::TransitionBuilder;

use crate::core::{ActionItem, StateName, TransitionSpec};
use serde_json::Value;

/// Create a transition to `target` that is taken only when `guard` is truthy.
///
/// # Example
///
/// ```
/// use xfsm::builder::{guarded_transition, MachineBuilder, StateNodeBuilder};
///
/// let machine = MachineBuilder::new()
///     .initial("locked")
///     .state(
///         "locked",
///         StateNodeBuilder::new().on(
///             "COIN",
///             guarded_transition("open", |_ctx, event| event["value"].as_u64() >= Some(25)),
///         ),
///     )
///     .state("open", StateNodeBuilder::new())
///     .build_machine()
///     .unwrap();
///
/// let denied = machine
///     .transition("locked", serde_json::json!({"type": "COIN", "value": 10}))
///     .unwrap();
/// assert!(denied.is_none());
/// ```
pub fn guarded_transition<F, R>(target: impl Into<StateName>, guard: F) -> TransitionSpec
where
    F: Fn(&Value, &Value) -> R + Send + Sync + 'static,
    R: Into<Value>,
{
    TransitionBuilder::new().target(target).when(guard).build()
}

/// Create a targetless transition that only runs `actions`.
///
/// # Example
///
/// ```
/// use xfsm::builder::targetless_transition;
/// use xfsm::core::ActionItem;
///
/// let spec = targetless_transition(vec![ActionItem::named("log")]);
/// assert!(spec.target.is_none());
/// ```
pub fn targetless_transition(actions: Vec<ActionItem>) -> TransitionSpec {
    TransitionSpec {
        target: None,
        actions,
        cond: None,
    }
}
