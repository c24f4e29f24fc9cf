//! # Update channels: the model → view direction.
//!
//! - [`UpdateChannel`] trait: receives property changes for one view
//! - [`HostUpdater`]: channel that marshals changes onto a [`Host`](crate::Host) loop
//! - [`ChannelSet`]: the controller's deduplicated, panic-isolated subscriber set
//!
//! ## Architecture
//! ```text
//! Model ── report_property_change ──► Controller ──► ChannelSet::fan_out
//!                                                      │
//!                                   ┌──────────────────┼──────────────────┐
//!                                   ▼                  ▼                  ▼
//!                              HostUpdater        HostUpdater        custom channel
//!                                   │                  │
//!                               EventLoop          TokioHost
//!                                   ▼                  ▼
//!                          view.update_component  view.update_component
//! ```
//!
//! ## Implementing custom channels
//! ```no_run
//! use mvcbridge::{PropertyChange, UpdateChannel};
//!
//! struct Recorder;
//!
//! impl UpdateChannel for Recorder {
//!     fn deliver(&self, change: PropertyChange) {
//!         println!("{} = {}", change.property, change.new);
//!     }
//!     fn name(&self) -> &str { "recorder" }
//! }
//! ```

mod channel;
mod host_updater;
mod set;

pub use channel::UpdateChannel;
pub use host_updater::HostUpdater;
pub use set::ChannelSet;
pub(crate) use set::deliver_isolated;
