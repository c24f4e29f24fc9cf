//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish diagnostic events emitted by the controller and its channel set.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Controller` (submit / drain / report / replay / registration),
//!   `ChannelSet` fan-out (channel panics).
//! - **Consumers**: `LogWriter` (feature `logging`) and any user receiver from
//!   [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
