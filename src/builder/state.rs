//! Builder for state nodes.

use crate::core::{ActionItem, OnSpec, StateName, StateNode};

/// Builder for a flat state node.
#[derive(Clone, Debug, Default)]
pub struct StateNodeBuilder {
    node: StateNode,
}

impl StateNodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry action.
    pub fn entry(mut self, item: impl Into<ActionItem>) -> Self {
        self.node.entry.push(item.into());
        self
    }

    /// Append an exit action.
    pub fn exit(mut self, item: impl Into<ActionItem>) -> Self {
        self.node.exit.push(item.into());
        self
    }

    /// Map an event type to a target name, a transition, or an ordered list
    /// of guarded candidates. A later call for the same event replaces the
    /// earlier one.
    pub fn on(mut self, event: impl Into<String>, spec: impl Into<OnSpec>) -> Self {
        self.node.on.insert(event.into(), spec.into());
        self
    }

    /// Record a nested child state. Nested states are reported by validation
    /// and never entered.
    pub fn nested_state(mut self, name: impl Into<StateName>) -> Self {
        self.node.nested.push(name.into());
        self
    }

    pub fn build(self) -> StateNode {
        self.node
    }
}

impl From<StateNodeBuilder> for StateNode {
    fn from(builder: StateNodeBuilder) -> Self {
        builder.build()
    }
}
