//! Guard predicates for controlling transitions.
//!
//! A guard is evaluated with `(context, event)` and its result is coerced with
//! generic truthiness. Guards never mutate context.

use super::action::{lookup, ActionTable};
use super::value::{truthy, CallError, Callable};
use serde_json::Value;

/// Condition attached to a transition candidate (`cond`).
///
/// # Example
///
/// ```rust
/// use xfsm::core::Guard;
/// use serde_json::json;
///
/// let has_fuel = Guard::from_fn(|ctx, _event| ctx["fuel"].as_i64().unwrap_or(0));
///
/// assert!(has_fuel.check(None, &json!({"fuel": 2}), &json!({"type": "GO"})).unwrap());
/// assert!(!has_fuel.check(None, &json!({"fuel": 0}), &json!({"type": "GO"})).unwrap());
/// ```
#[derive(Clone, Debug)]
pub enum Guard {
    Function(Callable),
    /// Resolved against the owner's named-action table.
    Named(String),
}

impl Guard {
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::Function(Callable::from_fn(f))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Evaluate the guard.
    ///
    /// A named guard missing from `table` does not block the transition.
    pub fn check(
        &self,
        table: Option<&ActionTable>,
        context: &Value,
        event: &Value,
    ) -> Result<bool, CallError> {
        let callable = match self {
            Self::Function(f) => f,
            Self::Named(name) => match lookup(table, name) {
                Some(f) => f,
                None => {
                    tracing::debug!(guard = %name, "named guard not found, treating as passed");
                    return Ok(true);
                }
            },
        };
        callable.call(context, event).map(|result| truthy(&result))
    }
}

impl From<Callable> for Guard {
    fn from(callable: Callable) -> Self {
        Self::Function(callable)
    }
}

impl From<&str> for Guard {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event() -> Value {
        json!({"type": "GO"})
    }

    #[test]
    fn function_guard_uses_truthiness() {
        let guard = Guard::from_fn(|ctx, _| ctx["flag"].clone());

        assert!(guard.check(None, &json!({"flag": "yes"}), &event()).unwrap());
        assert!(!guard.check(None, &json!({"flag": ""}), &event()).unwrap());
        assert!(!guard.check(None, &json!({}), &event()).unwrap());
    }

    #[test]
    fn guard_sees_event() {
        let guard = Guard::from_fn(|_, e| e["type"] == "GO");

        assert!(guard.check(None, &json!({}), &event()).unwrap());
        assert!(!guard.check(None, &json!({}), &json!({"type": "STOP"})).unwrap());
    }

    #[test]
    fn named_guard_resolves_through_table() {
        let mut table = ActionTable::new();
        table.insert("never".into(), Callable::from_fn(|_, _| false));

        let guard = Guard::named("never");
        assert!(!guard.check(Some(&table), &json!({}), &event()).unwrap());
    }

    #[test]
    fn missing_named_guard_passes() {
        let guard = Guard::named("unknown");
        assert!(guard.check(None, &json!({}), &event()).unwrap());
        assert!(guard
            .check(Some(&ActionTable::new()), &json!({}), &event())
            .unwrap());
    }

    #[test]
    fn guard_errors_propagate() {
        let guard = Guard::Function(Callable::new(|_, _| Err(CallError::new("bad guard"))));
        let err = guard.check(None, &json!({}), &event()).unwrap_err();
        assert_eq!(err.message(), "bad guard");
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::from_fn(|ctx, _| ctx["n"].as_i64().unwrap_or(0) > 1);
        let ctx = json!({"n": 2});
        assert_eq!(
            guard.check(None, &ctx, &event()).unwrap(),
            guard.check(None, &ctx, &event()).unwrap()
        );
    }
}
