//! The imperative shell around the pure core.
//!
//! # Key Concepts
//!
//! - **Pipeline**: executes a flattened action list against a context
//! - **Service**: owns a live context, the current state, a status and listeners
//! - **Subscriptions**: listener handles that close over their own id only
//!
//! Data flows one way: `Service::send` asks the pure [`Machine`](crate::core::Machine)
//! for the next state, runs its actions through the pipeline, commits the
//! result and then notifies listeners.

mod pipeline;
mod service;
mod subscription;

pub use pipeline::run_actions;
pub use service::{Service, Status};
pub use subscription::{Listener, ListenerId, Subscription};
