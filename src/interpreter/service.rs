//! The interpreter: a running instance of a machine.

use super::pipeline::run_actions;
use super::subscription::{ListenerRegistry, Subscription};
use crate::core::event::init_event;
use crate::core::{
    normalize_event, ActionOptions, ActionTable, CallError, FsmError, Machine, StateObject,
    StateRef,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle of a service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    NotStarted,
    Running,
    Stopped,
}

impl Status {
    /// Numeric form: NotStarted=0, Running=1, Stopped=2.
    pub fn as_number(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::Running => 1,
            Self::Stopped => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::Running => "Running",
            Self::Stopped => "Stopped",
        }
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.as_number()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A running instance of a [`Machine`] with its own context, current state,
/// status and listeners.
///
/// All operations are synchronous. `start` and `send` take `&mut self`, so a
/// callback cannot send into the service whose `send` is in flight. Listener
/// failures are not isolated: they propagate out of `start`/`send` after the
/// new state has been committed.
///
/// # Example
///
/// ```rust
/// use xfsm::builder::{MachineBuilder, StateNodeBuilder};
/// use xfsm::core::Machine;
/// use xfsm::interpreter::Status;
/// use xfsm::assign;
/// use serde_json::json;
///
/// let definition = MachineBuilder::new()
///     .initial("idle")
///     .context(json!({"runs": 0}))
///     .state("idle", StateNodeBuilder::new().on("RUN", "running"))
///     .state(
///         "running",
///         StateNodeBuilder::new()
///             .entry(assign! { runs => |ctx, _| ctx["runs"].as_i64().unwrap_or(0) + 1 })
///             .on("DONE", "idle"),
///     )
///     .build()
///     .unwrap();
///
/// let mut service = Machine::new(definition).interpret();
/// service.start().unwrap();
/// assert_eq!(service.status(), Status::Running);
///
/// assert_eq!(service.send("RUN").unwrap().as_deref(), Some("running"));
/// assert_eq!(service.context()["runs"], json!(1));
/// assert_eq!(service.send("RUN").unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Service {
    id: Uuid,
    machine: Machine,
    options: ActionOptions,
    context: Value,
    state: Option<StateObject>,
    status: Status,
    listeners: ListenerRegistry,
}

impl Service {
    /// Create a service with no override table of its own.
    pub fn new(machine: Machine) -> Self {
        Self::with_options(machine, ActionOptions::default())
    }

    /// Create a service whose action table overrides the machine's.
    pub fn with_options(machine: Machine, options: ActionOptions) -> Self {
        let context = machine.definition().context.clone();
        Self {
            id: Uuid::new_v4(),
            machine,
            options,
            context,
            state: None,
            status: Status::NotStarted,
            listeners: ListenerRegistry::default(),
        }
    }

    /// Unique id, used as the `service` field in log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The bound machine.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Last committed state; `None` until the first `start`.
    pub fn state(&self) -> Option<&StateObject> {
        self.state.as_ref()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The live context.
    pub fn context(&self) -> &Value {
        &self.context
    }

    /// Service override, then the machine's lookup chain.
    pub fn named_actions(&self) -> Option<&ActionTable> {
        self.options
            .actions
            .as_deref()
            .or_else(|| self.machine.named_actions())
    }

    /// Enter the initial state, run its entry actions and notify listeners.
    ///
    /// A no-op while already running. Restarting a stopped service begins
    /// again from the initial state, keeping the current context.
    pub fn start(&mut self) -> Result<&mut Self, FsmError> {
        if self.status == Status::Running {
            return Ok(self);
        }

        let initial = self.machine.initial_state()?;
        if !self.context.is_object() {
            self.context = Value::Object(Map::new());
        }

        self.commit(initial, &init_event())?;
        self.status = Status::Running;
        tracing::info!(
            service = %self.id,
            state = %self.state.as_ref().map_or("", |s| s.value.as_str()),
            "service started"
        );

        self.notify()?;
        Ok(self)
    }

    /// Stop the service and drop every listener. Existing subscription
    /// handles become inert. State and context are kept.
    pub fn stop(&mut self) -> &mut Self {
        self.status = Status::Stopped;
        self.listeners.clear();
        tracing::info!(service = %self.id, "service stopped");
        self
    }

    /// Send an event. Returns the new state value, or `None` when the
    /// service is not running or there is no transition.
    ///
    /// If an action fails, the actions that already ran keep their context
    /// patches but the new state is not committed.
    ///
    /// The status is checked before the event is normalized, so a service
    /// that is not running ignores even a malformed event.
    pub fn send(&mut self, event: impl Into<Value>) -> Result<Option<String>, FsmError> {
        if self.status != Status::Running {
            tracing::debug!(service = %self.id, status = %self.status, "service not running, event ignored");
            return Ok(None);
        }

        let event = normalize_event(event.into())?;
        let from = self.state.as_ref().map_or(StateRef::Initial, StateRef::State);
        let table = self.named_actions();
        let Some(next) = self.machine.transition_normalized(table, from, &event)? else {
            return Ok(None);
        };

        self.commit(next, &event)?;
        let value = self.state.as_ref().map(|s| s.value.clone());
        tracing::debug!(
            service = %self.id,
            state = %value.as_deref().unwrap_or(""),
            "transition committed"
        );

        self.notify()?;
        Ok(value)
    }

    /// Register a listener for committed states.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StateObject) -> Result<(), CallError> + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(listener))
    }

    /// Number of active listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Run the state's actions against a working copy of the context, then
    /// persist the context once into both the service and the state.
    fn commit(&mut self, mut next: StateObject, event: &Value) -> Result<(), FsmError> {
        let mut context = std::mem::take(&mut self.context);
        let outcome = run_actions(self.named_actions(), &mut context, &next.actions, event);
        self.context = context;
        outcome?;

        next.context = self.context.clone();
        self.state = Some(next);
        Ok(())
    }

    fn notify(&self) -> Result<(), FsmError> {
        match &self.state {
            Some(state) => self.listeners.notify(state),
            None => Ok(()),
        }
    }
}
