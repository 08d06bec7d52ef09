//! Action execution against a mutable context.
//!
//! The pipeline is phase-agnostic: it runs whatever flattened list the
//! machine produced, in order. The context is patched in place; the caller
//! persists it once the whole list has run.

use crate::core::{
    ensure_object, is_assign_type, lookup, ActionItem, ActionTable, AssignMap, AssignSource, AssignValue,
    CallError, Callable, FsmError,
};
use serde_json::{Map, Value};

/// Run `actions` in order against `context` and `event`.
///
/// Named references are resolved in `table`; a missing name is a no-op.
/// The first failing callable stops the run and its error is returned.
/// Patches applied before the failure stay in `context`.
///
/// # Example
///
/// ```rust
/// use xfsm::core::ActionItem;
/// use xfsm::interpreter::run_actions;
/// use serde_json::json;
///
/// let mut context = json!({"count": 1});
/// let actions = vec![
///     ActionItem::assign_fn(|ctx, _| json!({"count": ctx["count"].as_i64().unwrap_or(0) + 1})),
///     ActionItem::named("missing_is_a_no_op"),
/// ];
///
/// run_actions(None, &mut context, &actions, &json!({"type": "INC"})).unwrap();
/// assert_eq!(context, json!({"count": 2}));
/// ```
pub fn run_actions(
    table: Option<&ActionTable>,
    context: &mut Value,
    actions: &[ActionItem],
    event: &Value,
) -> Result<(), FsmError> {
    for item in actions {
        run_action(table, context, item, event).map_err(FsmError::Action)?;
    }
    Ok(())
}

fn run_action(
    table: Option<&ActionTable>,
    context: &mut Value,
    item: &ActionItem,
    event: &Value,
) -> Result<(), CallError> {
    match item {
        ActionItem::Function(f) | ActionItem::Exec(f) => invoke(f, context, event),
        ActionItem::Named(name) => invoke_named(table, name, context, event),
        ActionItem::Typed(action_type) if is_assign_type(action_type) => {
            // No `assignment` field: the item itself is the assignment map.
            let mut map = AssignMap::new();
            map.insert(
                "type".to_string(),
                AssignValue::Value(Value::String(action_type.clone())),
            );
            assign_map(context, &map, event)
        }
        ActionItem::Typed(action_type) => invoke_named(table, action_type, context, event),
        ActionItem::Assign(map) => assign_map(context, map, event),
        ActionItem::AssignTyped {
            action_type,
            assignment,
        } => {
            if !is_assign_type(action_type) {
                return invoke_named(table, action_type, context, event);
            }
            match assignment {
                AssignSource::Function(f) => assign_fn(context, f, event),
                AssignSource::Map(map) => assign_map(context, map, event),
            }
        }
    }
}

fn invoke(f: &Callable, context: &Value, event: &Value) -> Result<(), CallError> {
    if context.is_object() {
        f.call(context, event)?;
    } else {
        f.call(&Value::Object(Map::new()), event)?;
    }
    Ok(())
}

fn invoke_named(
    table: Option<&ActionTable>,
    name: &str,
    context: &Value,
    event: &Value,
) -> Result<(), CallError> {
    match lookup(table, name) {
        Some(f) => invoke(f, context, event),
        None => {
            tracing::debug!(action = %name, "named action not found, skipping");
            Ok(())
        }
    }
}

/// Function form: an object result is shallow-merged, overwriting existing
/// keys. Any other result is ignored.
fn assign_fn(context: &mut Value, f: &Callable, event: &Value) -> Result<(), CallError> {
    ensure_object(context);
    if let Value::Object(patch) = f.call(context, event)? {
        let ctx = ensure_object(context);
        for (key, value) in patch {
            if !key.is_empty() {
                ctx.insert(key, value);
            }
        }
    }
    Ok(())
}

/// Map form: each key is written in turn, so later computed values see
/// earlier writes.
fn assign_map(context: &mut Value, map: &AssignMap, event: &Value) -> Result<(), CallError> {
    ensure_object(context);
    for (key, value) in map {
        if key.is_empty() {
            continue;
        }
        let resolved = match value {
            AssignValue::Value(v) => v.clone(),
            AssignValue::Function(f) => f.call(context, event)?,
        };
        ensure_object(context).insert(key.clone(), resolved);
    }
    Ok(())
}
