//! State objects produced by the pure machine.

use super::action::ActionList;
use super::definition::StateName;
use serde_json::Value;

/// Result of `initial_state` or `transition`.
///
/// A fresh value is produced on every call. `context` is the snapshot the
/// transition was computed against; actions have not run yet.
///
/// # Example
///
/// ```rust
/// use xfsm::core::StateObject;
/// use serde_json::json;
///
/// let state = StateObject {
///     value: "green".to_string(),
///     context: json!({"n": 0}),
///     actions: Vec::new(),
///     changed: false,
/// };
///
/// assert!(state.matches("green"));
/// assert!(!state.matches("red"));
/// ```
#[derive(Clone, Debug)]
pub struct StateObject {
    pub value: StateName,
    pub context: Value,
    /// Flattened exit, transition and entry actions, in execution order.
    pub actions: ActionList,
    /// True iff the transition had a target different from its source.
    pub changed: bool,
}

impl StateObject {
    pub fn matches(&self, name: &str) -> bool {
        self.value == name
    }
}
