//! Macros for ergonomic definition construction.

/// Build a shorthand assignment action.
///
/// `key = value` writes a constant (anything convertible into a
/// `serde_json::Value`); `key => closure` writes the closure's result, computed
/// from `(context, event)`.
///
/// # Example
///
/// ```
/// use xfsm::assign;
/// use xfsm::interpreter::run_actions;
/// use serde_json::json;
///
/// let action = assign! {
///     count => |ctx, _event| ctx["count"].as_i64().unwrap_or(0) + 1,
///     label = "bumped",
/// };
///
/// let mut context = json!({"count": 4});
/// run_actions(None, &mut context, &[action], &json!({"type": "BUMP"})).unwrap();
/// assert_eq!(context, json!({"count": 5, "label": "bumped"}));
/// ```
#[macro_export]
macro_rules! assign {
    (@entry $map:ident, $key:ident => $f:expr) => {
        $map.insert(
            ::std::string::String::from(stringify!($key)),
            $crate::core::AssignValue::from_fn($f),
        );
    };
    (@entry $map:ident, $key:ident = $value:expr) => {
        $map.insert(
            ::std::string::String::from(stringify!($key)),
            $crate::core::AssignValue::Value(::std::convert::Into::into($value)),
        );
    };
    ($($key:ident $op:tt $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::core::AssignMap::new();
        $( $crate::assign!(@entry map, $key $op $value); )*
        $crate::core::ActionItem::Assign(map)
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{ActionItem, AssignValue};
    use serde_json::json;

    #[test]
    fn assign_macro_builds_shorthand_map() {
        let item = assign! {
            fixed = 3,
            computed => |ctx, _| ctx["fixed"].clone(),
        };

        match item {
            ActionItem::Assign(map) => {
                assert!(matches!(map.get("fixed"), Some(AssignValue::Value(v)) if *v == json!(3)));
                assert!(matches!(map.get("computed"), Some(AssignValue::Function(_))));
            }
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn assign_macro_accepts_json_values() {
        let item = assign! { nested = json!({"a": [1, 2]}) };
        match item {
            ActionItem::Assign(map) => {
                assert!(
                    matches!(map.get("nested"), Some(AssignValue::Value(v)) if *v == json!({"a": [1, 2]}))
                );
            }
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn empty_assign_macro_is_empty_map() {
        let item = assign! {};
        assert!(matches!(item, ActionItem::Assign(ref map) if map.is_empty()));
    }
}
