//! Builder for machine definitions.

use crate::builder::error::BuildError;
use crate::core::{
    ActionOptions, ActionTable, Callable, Machine, MachineDefinition, StateName, StateNode,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builder for constructing machine definitions with a fluent API.
#[derive(Clone, Debug, Default)]
pub struct MachineBuilder {
    initial: Option<StateName>,
    context: Value,
    states: Vec<(StateName, StateNode)>,
    actions: Option<ActionTable>,
    options: ActionOptions,
}

impl MachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateName>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Set the initial context. Usually an object.
    pub fn context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    /// Add a state.
    pub fn state(mut self, name: impl Into<StateName>, node: impl Into<StateNode>) -> Self {
        self.states.push((name.into(), node.into()));
        self
    }

    /// Add a callable to the default named-action table.
    pub fn action(mut self, name: impl Into<String>, callable: Callable) -> Self {
        self.actions
            .get_or_insert_with(ActionTable::new)
            .insert(name.into(), callable);
        self
    }

    /// Replace the default named-action table.
    pub fn actions(mut self, table: ActionTable) -> Self {
        self.actions = Some(table);
        self
    }

    /// Add a callable to the options-level table, which takes precedence over
    /// the default table.
    pub fn option_action(mut self, name: impl Into<String>, callable: Callable) -> Self {
        let table = self
            .options
            .actions
            .get_or_insert_with(|| Arc::new(ActionTable::new()));
        Arc::make_mut(table).insert(name.into(), callable);
        self
    }

    /// Replace the options-level tables.
    pub fn options(mut self, options: ActionOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the definition.
    ///
    /// An initial state missing from `states` is not rejected here; it
    /// surfaces as a definition error from `initial_state`.
    pub fn build(self) -> Result<MachineDefinition, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut states = BTreeMap::new();
        for (name, node) in self.states {
            if states.contains_key(&name) {
                return Err(BuildError::DuplicateState { name });
            }
            states.insert(name, node);
        }

        Ok(MachineDefinition {
            initial,
            context: self.context,
            states,
            actions: self.actions,
            options: self.options,
        })
    }

    /// Build the definition and wrap it in a [`Machine`].
    pub fn build_machine(self) -> Result<Machine, BuildError> {
        self.build().map(Machine::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateNodeBuilder;
    use serde_json::json;

    #[test]
    fn builder_validates_required_fields() {
        let result = MachineBuilder::new().build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_states() {
        let result = MachineBuilder::new().initial("a").build();
        assert!(matches!(result, Err(BuildError::NoStates)));
    }

    #[test]
    fn builder_rejects_duplicate_states() {
        let result = MachineBuilder::new()
            .initial("a")
            .state("a", StateNodeBuilder::new())
            .state("a", StateNodeBuilder::new())
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateState { name: "a".into() }
        );
    }

    #[test]
    fn fluent_api_builds_definition() {
        let definition = MachineBuilder::new()
            .initial("a")
            .context(json!({"n": 0}))
            .state("a", StateNodeBuilder::new().on("GO", "b"))
            .state("b", StateNodeBuilder::new())
            .action("log", Callable::effect(|_, _| {}))
            .build()
            .unwrap();

        assert_eq!(definition.initial, "a");
        assert_eq!(definition.context, json!({"n": 0}));
        assert_eq!(definition.states.len(), 2);
        assert!(definition.actions.unwrap().contains_key("log"));
        assert!(definition.options.actions.is_none());
    }

    #[test]
    fn option_actions_take_precedence_over_defaults() {
        let machine = MachineBuilder::new()
            .initial("a")
            .state("a", StateNodeBuilder::new())
            .action("default_only", Callable::effect(|_, _| {}))
            .option_action("from_options", Callable::effect(|_, _| {}))
            .build_machine()
            .unwrap();

        let table = machine.named_actions().unwrap();
        assert!(table.contains_key("from_options"));
        assert!(!table.contains_key("default_only"));
    }

    #[test]
    fn unknown_initial_is_accepted_at_build_time() {
        let machine = MachineBuilder::new()
            .initial("missing")
            .state("a", StateNodeBuilder::new())
            .build_machine()
            .unwrap();

        assert!(machine.initial_state().is_err());
    }
}
