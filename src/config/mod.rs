//! Loading machine definitions from JSON.
//!
//! JSON cannot carry functions, so a config describes the declarative
//! skeleton: states, targets, guard and action names, and assignment maps
//! with constant values. Callables are attached afterwards by name on the
//! returned [`MachineBuilder`].
//!
//! # Example
//!
//! ```rust
//! use xfsm::config;
//! use xfsm::core::Callable;
//! use serde_json::json;
//!
//! let machine = config::from_json(&json!({
//!     "initial": "green",
//!     "context": {"n": 0},
//!     "states": {
//!         "green": {"on": {"NEXT": "yellow"}},
//!         "yellow": {"on": {"NEXT": {"target": "red", "cond": "allowed"}}},
//!         "red": {}
//!     }
//! }))
//! .unwrap()
//! .action("allowed", Callable::from_fn(|_, _| true))
//! .build_machine()
//! .unwrap();
//!
//! let next = machine.transition("yellow", "NEXT").unwrap().unwrap();
//! assert_eq!(next.value, "red");
//! ```

pub mod error;

pub use error::ConfigError;

use crate::builder::MachineBuilder;
use crate::core::{
    is_assign_type, kind_name, ActionItem, AssignMap, AssignSource, AssignValue, Guard, OnSpec,
    StateNode, TransitionSpec,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct RawMachine {
    initial: Option<String>,
    #[serde(default)]
    context: Value,
    #[serde(default)]
    states: BTreeMap<String, RawState>,
}

#[derive(Debug, Default, Deserialize)]
struct RawState {
    #[serde(default)]
    entry: OneOrMany,
    #[serde(default)]
    exit: OneOrMany,
    #[serde(default)]
    on: BTreeMap<String, Value>,
    #[serde(default)]
    states: Option<Value>,
}

/// Action lists may be written as a single item.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Value>),
    One(Value),
}

impl Default for OneOrMany {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl OneOrMany {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Many(items),
            other => Self::One(other),
        }
    }

    fn into_actions(self) -> Vec<ActionItem> {
        let items = match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        };
        items.into_iter().filter_map(action_from_json).collect()
    }
}

/// Parse a JSON config into a builder.
pub fn from_json(value: &Value) -> Result<MachineBuilder, ConfigError> {
    let raw = RawMachine::deserialize(value)?;

    let mut builder = MachineBuilder::new().context(raw.context);
    if let Some(initial) = raw.initial {
        builder = builder.initial(initial);
    }
    for (name, state) in raw.states {
        let node = state_from_raw(&name, state)?;
        builder = builder.state(name, node);
    }
    Ok(builder)
}

/// Parse a JSON config from text.
pub fn from_json_str(text: &str) -> Result<MachineBuilder, ConfigError> {
    let value: Value = serde_json::from_str(text)?;
    from_json(&value)
}

fn state_from_raw(name: &str, raw: RawState) -> Result<StateNode, ConfigError> {
    let mut on = BTreeMap::new();
    for (event, spec) in raw.on {
        let spec = on_from_json(name, &event, spec)?;
        on.insert(event, spec);
    }

    let nested = match raw.states {
        Some(Value::Object(children)) => children.keys().cloned().collect(),
        _ => Vec::new(),
    };

    Ok(StateNode {
        entry: raw.entry.into_actions(),
        exit: raw.exit.into_actions(),
        on,
        nested,
    })
}

fn on_from_json(state: &str, event: &str, value: Value) -> Result<OnSpec, ConfigError> {
    match value {
        Value::String(target) => Ok(OnSpec::Target(target)),
        Value::Object(obj) => Ok(OnSpec::Transition(transition_from_json(state, event, obj)?)),
        Value::Array(items) => {
            let mut candidates = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(target) => candidates.push(TransitionSpec::to(target)),
                    Value::Object(obj) => {
                        candidates.push(transition_from_json(state, event, obj)?)
                    }
                    other => {
                        tracing::debug!(
                            state = %state,
                            event = %event,
                            kind = kind_name(&other),
                            "skipping malformed transition candidate"
                        );
                    }
                }
            }
            Ok(OnSpec::Candidates(candidates))
        }
        other => Err(ConfigError::InvalidTransition {
            state: state.to_string(),
            event: event.to_string(),
            kind: kind_name(&other),
        }),
    }
}

fn transition_from_json(
    state: &str,
    event: &str,
    mut obj: Map<String, Value>,
) -> Result<TransitionSpec, ConfigError> {
    let target = match obj.remove("target") {
        Some(Value::String(target)) => Some(target),
        _ => None,
    };

    let cond = match obj.remove("cond") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(Guard::Named(name)),
        Some(other) => {
            return Err(ConfigError::InvalidGuard {
                state: state.to_string(),
                event: event.to_string(),
                kind: kind_name(&other),
            })
        }
    };

    let actions = obj
        .remove("actions")
        .map(|value| OneOrMany::from_value(value).into_actions())
        .unwrap_or_default();

    Ok(TransitionSpec {
        target,
        actions,
        cond,
    })
}

fn action_from_json(value: Value) -> Option<ActionItem> {
    match value {
        Value::String(name) => Some(ActionItem::Named(name)),
        Value::Object(mut obj) => {
            let action_type = match obj.get("type") {
                Some(Value::String(t)) => t.clone(),
                _ => return Some(ActionItem::Assign(constant_map(obj))),
            };
            if !is_assign_type(&action_type) {
                return Some(ActionItem::Typed(action_type));
            }
            match obj.remove("assignment") {
                Some(Value::Object(map)) => Some(ActionItem::AssignTyped {
                    action_type,
                    assignment: AssignSource::Map(constant_map(map)),
                }),
                Some(other) => {
                    tracing::debug!(
                        kind = kind_name(&other),
                        "ignoring assignment that is not an object"
                    );
                    None
                }
                None => Some(ActionItem::Typed(action_type)),
            }
        }
        other => {
            tracing::debug!(kind = kind_name(&other), "ignoring action that is not a string or object");
            None
        }
    }
}

fn constant_map(obj: Map<String, Value>) -> AssignMap {
    obj.into_iter()
        .map(|(key, value)| (key, AssignValue::Value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{find_nested_state, Callable};
    use serde_json::json;

    fn traffic_light() -> Value {
        json!({
            "initial": "green",
            "context": {"n": 0},
            "states": {
                "green": {"on": {"NEXT": "yellow"}, "exit": "leaving_green"},
                "yellow": {
                    "entry": [{"n": 1}, "log"],
                    "on": {"NEXT": "red"}
                },
                "red": {"on": {"NEXT": "green"}}
            }
        })
    }

    #[test]
    fn parses_states_and_shorthand_targets() {
        let definition = from_json(&traffic_light()).unwrap().build().unwrap();

        assert_eq!(definition.initial, "green");
        assert_eq!(definition.context, json!({"n": 0}));
        assert_eq!(definition.states.len(), 3);
        assert!(matches!(
            definition.states["green"].on.get("NEXT"),
            Some(OnSpec::Target(t)) if t == "yellow"
        ));
    }

    #[test]
    fn single_action_is_accepted_as_list() {
        let definition = from_json(&traffic_light()).unwrap().build().unwrap();
        let exit = &definition.states["green"].exit;
        assert_eq!(exit.len(), 1);
        assert!(matches!(&exit[0], ActionItem::Named(n) if n == "leaving_green"));
    }

    #[test]
    fn action_shapes_are_classified() {
        let items: Vec<ActionItem> = OneOrMany::Many(vec![
            json!("named"),
            json!({"type": "typed"}),
            json!({"type": "assign", "assignment": {"a": 1}}),
            json!({"type": "xstate.assign"}),
            json!({"a": 1, "b": "two"}),
            json!({"type": 7, "c": true}),
            json!(42),
        ])
        .into_actions();

        assert_eq!(items.len(), 6);
        assert!(matches!(&items[0], ActionItem::Named(n) if n == "named"));
        assert!(matches!(&items[1], ActionItem::Typed(t) if t == "typed"));
        assert!(matches!(
            &items[2],
            ActionItem::AssignTyped { action_type, assignment: AssignSource::Map(m) }
                if action_type == "assign" && m.contains_key("a")
        ));
        assert!(matches!(&items[3], ActionItem::Typed(t) if t == "xstate.assign"));
        assert!(matches!(&items[4], ActionItem::Assign(m) if m.len() == 2));
        assert!(matches!(&items[5], ActionItem::Assign(m) if m.contains_key("type")));
    }

    #[test]
    fn transition_objects_and_candidates() {
        let definition = from_json(&json!({
            "initial": "a",
            "states": {
                "a": {
                    "on": {
                        "PING": {"actions": "pong"},
                        "GO": [
                            {"target": "b", "cond": "first"},
                            "c",
                            5
                        ]
                    }
                },
                "b": {},
                "c": {}
            }
        }))
        .unwrap()
        .build()
        .unwrap();

        match definition.states["a"].on.get("PING") {
            Some(OnSpec::Transition(spec)) => {
                assert!(spec.target.is_none());
                assert_eq!(spec.actions.len(), 1);
            }
            other => panic!("unexpected spec {other:?}"),
        }
        match definition.states["a"].on.get("GO") {
            Some(OnSpec::Candidates(c)) => {
                assert_eq!(c.len(), 2);
                assert!(matches!(c[0].cond, Some(Guard::Named(ref n)) if n == "first"));
                assert_eq!(c[1].target.as_deref(), Some("c"));
            }
            other => panic!("unexpected spec {other:?}"),
        }
    }

    #[test]
    fn invalid_transition_kind_is_rejected() {
        let err = from_json(&json!({
            "initial": "a",
            "states": {"a": {"on": {"GO": 3}}}
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidTransition { ref state, ref event, kind: "number" }
                if state == "a" && event == "GO"
        ));
    }

    #[test]
    fn non_name_guard_is_rejected() {
        let err = from_json(&json!({
            "initial": "a",
            "states": {"a": {"on": {"GO": {"target": "a", "cond": true}}}}
        }))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidGuard { kind: "boolean", .. }));
    }

    #[test]
    fn nested_states_are_recorded() {
        let definition = from_json(&json!({
            "initial": "outer",
            "states": {
                "outer": {"states": {"inner": {}}},
                "flat": {}
            }
        }))
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(definition.states["outer"].nested, vec!["inner".to_string()]);
        assert_eq!(find_nested_state(&definition), Some("outer"));
    }

    #[test]
    fn malformed_json_text_is_parse_error() {
        assert!(matches!(from_json_str("{not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            from_json_str(r#"{"initial": 5}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn callables_attach_by_name() {
        let machine = from_json_str(
            r#"{
                "initial": "a",
                "states": {
                    "a": {"on": {"GO": {"target": "b", "cond": "never"}}},
                    "b": {}
                }
            }"#,
        )
        .unwrap()
        .action("never", Callable::from_fn(|_, _| false))
        .build_machine()
        .unwrap();

        assert!(machine.transition("a", "GO").unwrap().is_none());
    }
}
