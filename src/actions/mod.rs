//! # Payload types that travel between views and the model.
//!
//! - [`Value`] tagged property value (none / bool / number / text / opaque)
//! - [`ActionCommand`] view → model command
//! - [`PropertyChange`] model → view notification
//!
//! ```text
//! View ── ActionCommand ──► Controller ──► Model
//! View ◄── PropertyChange ── Controller ◄── Model
//! ```

mod action;
mod change;
mod value;

pub use action::ActionCommand;
pub use change::PropertyChange;
pub use value::Value;
