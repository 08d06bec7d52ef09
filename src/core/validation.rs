//! Flat-topology validation.

use super::definition::MachineDefinition;

/// Name of one state declaring nested states, if any.
pub fn find_nested_state(definition: &MachineDefinition) -> Option<&str> {
    definition
        .states
        .iter()
        .find(|(_, node)| !node.nested.is_empty())
        .map(|(name, _)| name.as_str())
}

/// Check that the definition is flat. A violation is logged and otherwise
/// ignored; nested states are never entered.
pub fn validate_flat(definition: &MachineDefinition) -> bool {
    match find_nested_state(definition) {
        Some(name) => {
            tracing::warn!(
                state = %name,
                "nested states are not supported (found nested under state \"{}\")",
                name
            );
            false
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionOptions, StateNode};
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn definition(states: Vec<(&str, StateNode)>) -> MachineDefinition {
        MachineDefinition {
            initial: "a".into(),
            context: Value::Null,
            states: states
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
            actions: None,
            options: ActionOptions::default(),
        }
    }

    #[test]
    fn flat_definition_is_valid() {
        let def = definition(vec![("a", StateNode::default()), ("b", StateNode::default())]);
        assert!(validate_flat(&def));
        assert_eq!(find_nested_state(&def), None);
    }

    #[test]
    fn nested_state_is_reported() {
        let nested = StateNode {
            nested: vec!["inner".into()],
            ..StateNode::default()
        };
        let def = definition(vec![("a", StateNode::default()), ("b", nested)]);

        assert!(!validate_flat(&def));
        assert_eq!(find_nested_state(&def), Some("b"));
    }
}
