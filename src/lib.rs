//! xfsm: a flat finite-state-machine engine
//!
//! xfsm splits a state machine into a pure core and an imperative shell.
//! The [`Machine`] computes next states without running any action, while a
//! [`Service`] owns the live context, executes action lists and notifies
//! subscribers.
//!
//! # Core Concepts
//!
//! - **Machine**: immutable definition plus a pure `transition` function
//! - **Service**: a running instance with context, status and listeners
//! - **Actions**: side-effecting calls or context assignments, run on exit,
//!   transition and entry
//! - **Guards**: predicates that pick among candidate transitions
//!
//! Contexts and events are `serde_json::Value`s. Functions are attached as
//! [`Callable`](core::Callable)s.
//!
//! # Example
//!
//! ```rust
//! use xfsm::builder::{MachineBuilder, StateNodeBuilder};
//! use xfsm::assign;
//! use serde_json::json;
//!
//! let machine = MachineBuilder::new()
//!     .initial("green")
//!     .context(json!({"n": 0}))
//!     .state("green", StateNodeBuilder::new().on("NEXT", "yellow"))
//!     .state(
//!         "yellow",
//!         StateNodeBuilder::new()
//!             .entry(assign! { n => |ctx, _| ctx["n"].as_i64().unwrap_or(0) + 1 })
//!             .on("NEXT", "red"),
//!     )
//!     .state("red", StateNodeBuilder::new().on("NEXT", "green"))
//!     .build_machine()
//!     .unwrap();
//!
//! let mut service = machine.interpret();
//! service.start().unwrap();
//! assert_eq!(service.send("NEXT").unwrap().as_deref(), Some("yellow"));
//! assert_eq!(service.context()["n"], json!(1));
//! assert_eq!(service.send("BOGUS").unwrap(), None);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod interpreter;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, StateNodeBuilder, TransitionBuilder};
pub use config::ConfigError;
pub use core::{
    ActionItem, CallError, Callable, FsmError, Guard, Machine, MachineDefinition, StateObject,
};
pub use interpreter::{Service, Status, Subscription};
