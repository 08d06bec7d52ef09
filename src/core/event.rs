//! Event normalization.
//!
//! Events arrive as bare strings or objects. Everything downstream of
//! normalization sees an object with a string `type` field.

use super::error::InputError;
use super::value::kind_name;
use serde_json::{Map, Value};

/// Type assigned to the synthetic event used when a service starts.
pub const INIT_EVENT: &str = "xstate.init";

/// Normalize an inbound event to `{type: string, ...}`.
///
/// - a string `s` becomes `{type: s}`
/// - an object with a missing or non-string `type` gets `type: ""`
/// - an object with a string `type` is returned unchanged
///
/// # Example
///
/// ```rust
/// use xfsm::core::normalize_event;
/// use serde_json::json;
///
/// assert_eq!(normalize_event(json!("NEXT")).unwrap(), json!({"type": "NEXT"}));
/// assert_eq!(
///     normalize_event(json!({"value": 3})).unwrap(),
///     json!({"type": "", "value": 3})
/// );
/// assert!(normalize_event(json!(7)).is_err());
/// ```
pub fn normalize_event(event: Value) -> Result<Value, InputError> {
    match event {
        Value::String(s) => {
            let mut obj = Map::new();
            obj.insert("type".to_string(), Value::String(s));
            Ok(Value::Object(obj))
        }
        Value::Object(mut obj) => {
            if !obj.get("type").is_some_and(Value::is_string) {
                obj.insert("type".to_string(), Value::String(String::new()));
            }
            Ok(Value::Object(obj))
        }
        other => Err(InputError::InvalidEvent {
            kind: kind_name(&other),
        }),
    }
}

/// The `type` of a normalized event, or `""` when absent.
pub fn event_type(event: &Value) -> &str {
    event.get("type").and_then(Value::as_str).unwrap_or("")
}

pub(crate) fn init_event() -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(INIT_EVENT.to_string()));
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_becomes_typed_object() {
        assert_eq!(normalize_event(json!("GO")).unwrap(), json!({"type": "GO"}));
    }

    #[test]
    fn object_with_type_passes_through() {
        let event = json!({"type": "GO", "speed": 3});
        assert_eq!(normalize_event(event.clone()).unwrap(), event);
    }

    #[test]
    fn non_string_type_is_replaced() {
        let normalized = normalize_event(json!({"type": 5, "x": true})).unwrap();
        assert_eq!(normalized, json!({"type": "", "x": true}));
    }

    #[test]
    fn other_kinds_are_rejected() {
        assert_eq!(
            normalize_event(json!(null)),
            Err(InputError::InvalidEvent { kind: "null" })
        );
        assert_eq!(
            normalize_event(json!(["GO"])),
            Err(InputError::InvalidEvent { kind: "array" })
        );
    }

    #[test]
    fn event_type_reads_type_field() {
        assert_eq!(event_type(&json!({"type": "GO"})), "GO");
        assert_eq!(event_type(&json!({})), "");
        assert_eq!(event_type(&init_event()), INIT_EVENT);
    }
}
