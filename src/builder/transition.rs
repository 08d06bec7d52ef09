//! Builder for transition candidates.

use crate::core::{ActionItem, Guard, OnSpec, StateName, TransitionSpec};
use serde_json::Value;

/// Builder for a single transition candidate.
///
/// Every field is optional: without a target the transition is targetless,
/// without a guard it always passes.
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    target: Option<StateName>,
    actions: Vec<ActionItem>,
    cond: Option<Guard>,
}

impl TransitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target state.
    pub fn target(mut self, state: impl Into<StateName>) -> Self {
        self.target = Some(state.into());
        self
    }

    /// Append a transition action.
    pub fn action(mut self, item: impl Into<ActionItem>) -> Self {
        self.actions.push(item.into());
        self
    }

    /// Set the guard.
    pub fn cond(mut self, guard: impl Into<Guard>) -> Self {
        self.cond = Some(guard.into());
        self
    }

    /// Set the guard from a closure; its result is coerced with truthiness.
    pub fn when<F, R>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.cond = Some(Guard::from_fn(predicate));
        self
    }

    pub fn build(self) -> TransitionSpec {
        TransitionSpec {
            target: self.target,
            actions: self.actions,
            cond: self.cond,
        }
    }
}

impl From<TransitionBuilder> for TransitionSpec {
    fn from(builder: TransitionBuilder) -> Self {
        builder.build()
    }
}

impl From<TransitionBuilder> for OnSpec {
    fn from(builder: TransitionBuilder) -> Self {
        OnSpec::Transition(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_builder_is_targetless_and_unguarded() {
        let spec = TransitionBuilder::new().build();
        assert!(spec.target.is_none());
        assert!(spec.actions.is_empty());
        assert!(spec.cond.is_none());
    }

    #[test]
    fn fluent_api_builds_transition() {
        let spec = TransitionBuilder::new()
            .target("done")
            .action("log")
            .action(ActionItem::effect(|_, _| {}))
            .when(|ctx, _| ctx["ready"].clone())
            .build();

        assert_eq!(spec.target.as_deref(), Some("done"));
        assert_eq!(spec.actions.len(), 2);

        let guard = spec.cond.unwrap();
        let event = json!({"type": "GO"});
        assert!(guard.check(None, &json!({"ready": true}), &event).unwrap());
        assert!(!guard.check(None, &json!({"ready": false}), &event).unwrap());
    }

    #[test]
    fn named_cond_is_kept() {
        let spec = TransitionBuilder::new().cond("is_ready").build();
        assert!(matches!(spec.cond, Some(Guard::Named(ref n)) if n == "is_ready"));
    }

    #[test]
    fn converts_into_on_spec() {
        let on: OnSpec = TransitionBuilder::new().target("b").into();
        assert!(matches!(on, OnSpec::Transition(ref t) if t.target.as_deref() == Some("b")));
    }
}
