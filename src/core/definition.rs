//! Machine definitions: states, transitions and named-action tables.
//!
//! A [`MachineDefinition`] is immutable once built and is shared read-only by
//! every machine and service created from it.

use super::action::{ActionList, ActionOptions, ActionTable};
use super::guard::Guard;
use serde_json::Value;
use std::collections::BTreeMap;

/// State names are plain strings.
pub type StateName = String;

/// One candidate transition.
#[derive(Clone, Debug, Default)]
pub struct TransitionSpec {
    /// Absent for a targetless transition.
    pub target: Option<StateName>,
    pub actions: ActionList,
    pub cond: Option<Guard>,
}

impl TransitionSpec {
    pub fn to(target: impl Into<StateName>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::default()
        }
    }
}

/// What an `on` entry maps an event type to.
#[derive(Clone, Debug)]
pub enum OnSpec {
    /// Shorthand for `{target: name}`.
    Target(StateName),
    Transition(TransitionSpec),
    /// Evaluated in declared order; the first candidate whose guard passes wins.
    Candidates(Vec<TransitionSpec>),
}

impl From<&str> for OnSpec {
    fn from(target: &str) -> Self {
        Self::Target(target.to_string())
    }
}

impl From<String> for OnSpec {
    fn from(target: String) -> Self {
        Self::Target(target)
    }
}

impl From<TransitionSpec> for OnSpec {
    fn from(spec: TransitionSpec) -> Self {
        Self::Transition(spec)
    }
}

impl From<Vec<TransitionSpec>> for OnSpec {
    fn from(candidates: Vec<TransitionSpec>) -> Self {
        Self::Candidates(candidates)
    }
}

/// A single flat state.
#[derive(Clone, Debug, Default)]
pub struct StateNode {
    pub entry: ActionList,
    pub exit: ActionList,
    pub on: BTreeMap<String, OnSpec>,
    /// Names of child states declared under this node. Nested states are not
    /// supported; they are reported by validation and otherwise ignored.
    pub nested: Vec<StateName>,
}

/// Immutable machine definition.
#[derive(Clone, Debug)]
pub struct MachineDefinition {
    pub initial: StateName,
    /// Object, or `Value::Null` when absent.
    pub context: Value,
    pub states: BTreeMap<StateName, StateNode>,
    /// Default named-action table.
    pub actions: Option<ActionTable>,
    /// Options-level tables, consulted before [`MachineDefinition::actions`].
    pub options: ActionOptions,
}

impl MachineDefinition {
    pub fn state(&self, name: &str) -> Option<&StateNode> {
        self.states.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_converts_to_target_shorthand() {
        let spec: OnSpec = "yellow".into();
        assert!(matches!(spec, OnSpec::Target(ref t) if t == "yellow"));
    }

    #[test]
    fn transition_spec_to_sets_only_target() {
        let spec = TransitionSpec::to("red");
        assert_eq!(spec.target.as_deref(), Some("red"));
        assert!(spec.actions.is_empty());
        assert!(spec.cond.is_none());
    }

    #[test]
    fn default_transition_is_targetless() {
        assert!(TransitionSpec::default().target.is_none());
    }
}
