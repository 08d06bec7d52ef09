//! Action items and named-action tables.

use super::value::Callable;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Action types that select the built-in assignment.
pub const ASSIGN_TYPES: [&str; 2] = ["assign", "xstate.assign"];

/// Returns true for `"assign"` and `"xstate.assign"`.
pub fn is_assign_type(action_type: &str) -> bool {
    ASSIGN_TYPES.contains(&action_type)
}

/// Table of named callables used to resolve named actions and guards.
pub type ActionTable = BTreeMap<String, Callable>;

/// Ordered list of action items.
pub type ActionList = Vec<ActionItem>;

/// Value of one key in an assignment map.
#[derive(Clone, Debug)]
pub enum AssignValue {
    /// Written to the context as-is.
    Value(Value),
    /// Invoked with `(context, event)`; its result is written.
    Function(Callable),
}

impl AssignValue {
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::Function(Callable::from_fn(f))
    }
}

impl From<Value> for AssignValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Callable> for AssignValue {
    fn from(callable: Callable) -> Self {
        Self::Function(callable)
    }
}

/// Keyed assignment map.
pub type AssignMap = BTreeMap<String, AssignValue>;

/// Where an assignment gets its patch from.
#[derive(Clone, Debug)]
pub enum AssignSource {
    /// Invoked with `(context, event)`; an object result is shallow-merged.
    Function(Callable),
    /// Each key is written with its constant or computed value.
    Map(AssignMap),
}

/// One entry of an entry, exit or transition action list.
///
/// # Example
///
/// ```rust
/// use xfsm::core::{ActionItem, AssignSource, AssignValue, Callable};
/// use serde_json::json;
///
/// let actions = vec![
///     ActionItem::Named("notify".to_string()),
///     ActionItem::Function(Callable::effect(|_ctx, _event| {})),
///     ActionItem::assign_fn(|ctx, _event| json!({"count": ctx["count"].as_i64().unwrap_or(0) + 1})),
/// ];
/// assert_eq!(actions.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub enum ActionItem {
    /// A plain function invoked with `(context, event)`.
    Function(Callable),
    /// A name resolved against the named-action table.
    Named(String),
    /// `{exec: fn}`, invoked like [`ActionItem::Function`].
    Exec(Callable),
    /// `{type: name}`. Assign types run an assignment built from the item
    /// itself; other names are resolved against the named-action table.
    Typed(String),
    /// Shorthand assignment map (an object with neither `exec` nor `type`).
    Assign(AssignMap),
    /// `{type: "assign" | "xstate.assign", assignment: fn | map}`.
    AssignTyped {
        action_type: String,
        assignment: AssignSource,
    },
}

impl ActionItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn typed(action_type: impl Into<String>) -> Self {
        Self::Typed(action_type.into())
    }

    pub fn effect<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) + Send + Sync + 'static,
    {
        Self::Function(Callable::effect(f))
    }

    /// `{type: "xstate.assign", assignment: fn}`.
    pub fn assign_fn<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::AssignTyped {
            action_type: ASSIGN_TYPES[1].to_string(),
            assignment: AssignSource::Function(Callable::from_fn(f)),
        }
    }

    /// `{type: "xstate.assign", assignment: map}`.
    pub fn assign_map(map: AssignMap) -> Self {
        Self::AssignTyped {
            action_type: ASSIGN_TYPES[1].to_string(),
            assignment: AssignSource::Map(map),
        }
    }
}

impl From<Callable> for ActionItem {
    fn from(callable: Callable) -> Self {
        Self::Function(callable)
    }
}

impl From<&str> for ActionItem {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ActionItem {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Override tables attached to a machine or a service.
#[derive(Clone, Debug, Default)]
pub struct ActionOptions {
    pub actions: Option<Arc<ActionTable>>,
}

impl ActionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actions(actions: ActionTable) -> Self {
        Self {
            actions: Some(Arc::new(actions)),
        }
    }
}

/// Resolve a name in an optional table, yielding only callables.
pub(crate) fn lookup<'a>(table: Option<&'a ActionTable>, name: &str) -> Option<&'a Callable> {
    table.and_then(|t| t.get(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assign_types_are_recognized() {
        assert!(is_assign_type("assign"));
        assert!(is_assign_type("xstate.assign"));
        assert!(!is_assign_type("Assign"));
        assert!(!is_assign_type("log"));
    }

    #[test]
    fn string_converts_to_named_ref() {
        let item: ActionItem = "notify".into();
        assert!(matches!(item, ActionItem::Named(ref n) if n == "notify"));
    }

    #[test]
    fn assign_fn_uses_typed_form() {
        match ActionItem::assign_fn(|_, _| json!({})) {
            ActionItem::AssignTyped {
                action_type,
                assignment: AssignSource::Function(_),
            } => assert_eq!(action_type, "xstate.assign"),
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn lookup_finds_only_present_names() {
        let mut table = ActionTable::new();
        table.insert("a".into(), Callable::effect(|_, _| {}));

        assert!(lookup(Some(&table), "a").is_some());
        assert!(lookup(Some(&table), "b").is_none());
        assert!(lookup(None, "a").is_none());
    }
}
