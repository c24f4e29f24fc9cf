//! Controller: the mediator between views and the model.
//!
//! - [`Controller`]: pending action buffer, last-known-value cache, channel fan-out
//! - [`ControllerBuilder`]: wires a model and initial channels
//! - [`ControllerConfig`]: bus capacity and buffer growth warning

mod builder;
mod config;
mod mediator;
mod pending;

pub use builder::ControllerBuilder;
pub use config::ControllerConfig;
pub use mediator::Controller;
