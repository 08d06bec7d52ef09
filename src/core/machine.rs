//! The pure machine: initial state and transition computation.
//!
//! Nothing here runs actions or touches a service. Only guard functions are
//! invoked, so transitions are safe to compute speculatively.

use super::action::{ActionOptions, ActionTable};
use super::definition::{MachineDefinition, OnSpec, TransitionSpec};
use super::error::{DefinitionError, FsmError};
use super::event::{event_type, normalize_event};
use super::state::StateObject;
use super::validation::validate_flat;
use crate::interpreter::Service;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// Where a transition starts from.
#[derive(Clone, Copy, Debug)]
pub enum StateRef<'a> {
    /// The definition's initial state, guarded against the definition context.
    Initial,
    /// A bare state name, guarded against the definition context.
    Value(&'a str),
    /// A previous state object, guarded against its own context snapshot.
    State(&'a StateObject),
}

impl<'a> From<&'a str> for StateRef<'a> {
    fn from(value: &'a str) -> Self {
        Self::Value(value)
    }
}

impl<'a> From<&'a String> for StateRef<'a> {
    fn from(value: &'a String) -> Self {
        Self::Value(value.as_str())
    }
}

impl<'a> From<&'a StateObject> for StateRef<'a> {
    fn from(state: &'a StateObject) -> Self {
        Self::State(state)
    }
}

impl<'a> From<Option<&'a StateObject>> for StateRef<'a> {
    fn from(state: Option<&'a StateObject>) -> Self {
        state.map_or(Self::Initial, Self::State)
    }
}

/// A machine definition plus an optional machine-level action table.
///
/// Cloning is cheap: the definition is shared.
///
/// # Example
///
/// ```rust
/// use xfsm::builder::{MachineBuilder, StateNodeBuilder};
/// use xfsm::core::Machine;
///
/// let definition = MachineBuilder::new()
///     .initial("green")
///     .state("green", StateNodeBuilder::new().on("NEXT", "yellow"))
///     .state("yellow", StateNodeBuilder::new().on("NEXT", "green"))
///     .build()
///     .unwrap();
/// let machine = Machine::new(definition);
///
/// let initial = machine.initial_state().unwrap();
/// assert_eq!(initial.value, "green");
///
/// let next = machine.transition(&initial, "NEXT").unwrap().unwrap();
/// assert_eq!(next.value, "yellow");
/// assert!(next.changed);
///
/// assert!(machine.transition("yellow", "BOGUS").unwrap().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Machine {
    definition: Arc<MachineDefinition>,
    options: ActionOptions,
}

impl Machine {
    /// Create a machine with no override table of its own.
    pub fn new(definition: impl Into<Arc<MachineDefinition>>) -> Self {
        Self::with_options(definition, ActionOptions::default())
    }

    /// Create a machine whose own action table overrides the definition's.
    pub fn with_options(
        definition: impl Into<Arc<MachineDefinition>>,
        options: ActionOptions,
    ) -> Self {
        Self {
            definition: definition.into(),
            options,
        }
    }

    /// The definition this machine computes over.
    pub fn definition(&self) -> &MachineDefinition {
        &self.definition
    }

    /// A shared handle to the definition.
    pub fn shared_definition(&self) -> Arc<MachineDefinition> {
        Arc::clone(&self.definition)
    }

    /// The machine-level override table.
    pub fn options(&self) -> &ActionOptions {
        &self.options
    }

    /// Create a service bound to this machine.
    pub fn interpret(&self) -> Service {
        Service::new(self.clone())
    }

    /// Named-action table for this machine: its own override, then the
    /// definition's options, then the definition's defaults. The first table
    /// present wins; tables are never merged.
    pub fn named_actions(&self) -> Option<&ActionTable> {
        self.options
            .actions
            .as_deref()
            .or(self.definition.options.actions.as_deref())
            .or(self.definition.actions.as_ref())
    }

    /// Compute the initial state. Its actions are the initial state's entry
    /// actions; they are not executed here.
    pub fn initial_state(&self) -> Result<StateObject, FsmError> {
        let def = &self.definition;
        validate_flat(def);

        let node = def
            .state(&def.initial)
            .ok_or_else(|| DefinitionError::UnknownInitialState {
                initial: def.initial.clone(),
            })?;

        Ok(StateObject {
            value: def.initial.clone(),
            context: def.context.clone(),
            actions: node.entry.clone(),
            changed: false,
        })
    }

    /// Compute the next state for `event` from `from`.
    ///
    /// Returns `Ok(None)` when there is no transition: unknown source state,
    /// no `on` entry for the event, every candidate guarded out, or a target
    /// that is not a defined state.
    pub fn transition<'a>(
        &self,
        from: impl Into<StateRef<'a>>,
        event: impl Into<Value>,
    ) -> Result<Option<StateObject>, FsmError> {
        let event = normalize_event(event.into())?;
        self.transition_normalized(self.named_actions(), from.into(), &event)
    }

    /// Transition with named guards resolved against `table`. A service
    /// passes its own lookup chain here.
    pub(crate) fn transition_normalized(
        &self,
        table: Option<&ActionTable>,
        from: StateRef<'_>,
        event: &Value,
    ) -> Result<Option<StateObject>, FsmError> {
        let def = &self.definition;

        let (from, guard_context) = match from {
            StateRef::Initial => (def.initial.as_str(), &def.context),
            StateRef::Value(name) => (name, &def.context),
            StateRef::State(state) => (state.value.as_str(), &state.context),
        };

        let ev_type = event_type(event);
        if ev_type.is_empty() {
            tracing::debug!(state = %from, "event has an empty type, no transition");
            return Ok(None);
        }

        let Some(source) = def.state(from) else {
            tracing::debug!(state = %from, "source state is not defined, no transition");
            return Ok(None);
        };

        let Some(on) = source.on.get(ev_type) else {
            return Ok(None);
        };

        let Some(candidate) = self.select_candidate(table, on, from, guard_context, event)? else {
            tracing::debug!(state = %from, event = %ev_type, "no candidate passed its guard");
            return Ok(None);
        };

        let target = candidate.target.as_deref();
        let target_node = match target {
            Some(name) => match def.state(name) {
                Some(node) => Some(node),
                None => {
                    tracing::debug!(
                        state = %from,
                        event = %ev_type,
                        target = %name,
                        "transition target is not defined, no transition"
                    );
                    return Ok(None);
                }
            },
            None => None,
        };

        let mut actions = source.exit.clone();
        actions.extend(candidate.actions.iter().cloned());
        if let Some(node) = target_node {
            actions.extend(node.entry.iter().cloned());
        }

        Ok(Some(StateObject {
            value: target.unwrap_or(from).to_string(),
            context: guard_context.clone(),
            actions,
            changed: target.is_some_and(|t| t != from),
        }))
    }

    fn select_candidate<'s>(
        &self,
        table: Option<&ActionTable>,
        on: &'s OnSpec,
        from: &str,
        context: &Value,
        event: &Value,
    ) -> Result<Option<Cow<'s, TransitionSpec>>, FsmError> {
        match on {
            OnSpec::Target(target) => Ok(Some(Cow::Owned(TransitionSpec::to(target.clone())))),
            OnSpec::Transition(spec) => Ok(self
                .guard_passes(table, spec, from, context, event)?
                .then_some(Cow::Borrowed(spec))),
            OnSpec::Candidates(candidates) => {
                for spec in candidates {
                    if self.guard_passes(table, spec, from, context, event)? {
                        return Ok(Some(Cow::Borrowed(spec)));
                    }
                }
                Ok(None)
            }
        }
    }

    fn guard_passes(
        &self,
        table: Option<&ActionTable>,
        spec: &TransitionSpec,
        from: &str,
        context: &Value,
        event: &Value,
    ) -> Result<bool, FsmError> {
        let Some(guard) = &spec.cond else {
            return Ok(true);
        };

        let empty;
        let context = if context.is_object() {
            context
        } else {
            empty = Value::Object(Map::new());
            &empty
        };

        guard
            .check(table, context, event)
            .map_err(|source| FsmError::Guard {
                state: from.to_string(),
                event: event_type(event).to_string(),
                source,
            })
    }
}
