//! Dynamic-value helpers shared by guards, actions and listeners.
//!
//! Context and events are plain [`serde_json::Value`]s. Functions cannot live
//! inside a `Value`, so every user-supplied function is wrapped in a
//! [`Callable`].

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure raised by a user-supplied callable.
///
/// The engine never catches these; they propagate to the caller of
/// `transition`, `start` or `send`.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct CallError {
    message: String,
}

impl CallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

type CallableFn = dyn Fn(&Value, &Value) -> Result<Value, CallError> + Send + Sync;

/// A function invoked with `(context, event)`.
///
/// Cloning is cheap; clones share the same underlying function.
///
/// # Example
///
/// ```rust
/// use xfsm::core::{truthy, Callable};
/// use serde_json::json;
///
/// let is_positive = Callable::from_fn(|ctx, _event| ctx["n"].as_i64().unwrap_or(0) > 0);
///
/// let result = is_positive.call(&json!({"n": 3}), &json!({"type": "CHECK"})).unwrap();
/// assert!(truthy(&result));
/// ```
#[derive(Clone)]
pub struct Callable {
    f: Arc<CallableFn>,
}

impl Callable {
    /// Wrap a fallible function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Wrap an infallible function whose result converts into a `Value`.
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::new(move |ctx, event| Ok(f(ctx, event).into()))
    }

    /// Wrap a side-effecting function with no meaningful result.
    pub fn effect<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) + Send + Sync + 'static,
    {
        Self::new(move |ctx, event| {
            f(ctx, event);
            Ok(Value::Null)
        })
    }

    pub fn call(&self, context: &Value, event: &Value) -> Result<Value, CallError> {
        (self.f)(context, event)
    }

    /// True when both handles share the same function.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(<function>)")
    }
}

/// Generic truthiness: `null`, `false`, `0` and `""` are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Human-readable kind name used in input errors.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Replace a non-object value with a fresh empty object and return its map.
pub(crate) fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}
