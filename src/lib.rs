//! # mvcbridge
//!
//! **mvcbridge** decouples GUI views from an application model.
//!
//! User actions travel one way (view → controller → model) and property
//! changes travel the other way (model → controller → views). Neither side
//! ever holds a reference to the other.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!   │    View A    │   │    View B    │   │    View C    │   (UI threads)
//!   └──┬───────▲───┘   └──┬───────▲───┘   └──┬───────▲───┘
//!      │       │          │       │          │       │
//!      │ ActionCommand    │    HostUpdater (post onto host loop, FIFO)
//!      ▼       │          ▼       │          ▼       │
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Controller                                                       │
//! │  - PendingActions (unbounded FIFO, many producers, one drainer)   │
//! │  - last-known-value cache (name → Value)                          │
//! │  - ChannelSet (weak, deduplicated, panic-isolated fan-out)        │
//! │  - Bus (diagnostic events)                                        │
//! └──────┬──────────────────────────────────────────────▲─────────────┘
//!        │ update_notification(name)                     │ report_property_change(name, value)
//!        │ handle_action(ac)  ◄── drain_actions()        │ last_known_value(name)
//!        ▼                                               │
//!   ┌──────────────────────────────────────────────────────┐
//!   │                       Model                          │   (model thread)
//!   └──────────────────────────────────────────────────────┘
//! ```
//!
//! ### Late subscribers
//! ```text
//! new window ──► register_update_channel(ch) ──► replay_cached_state_to(ch)
//!                                                  └─► one PropertyChange per cached name (latest value)
//! ```
//!
//! ## Features
//! | Area            | Description                                                  | Key types / traits                           |
//! |-----------------|--------------------------------------------------------------|----------------------------------------------|
//! | **Payloads**    | Tagged values, actions and property changes.                 | [`Value`], [`ActionCommand`], [`PropertyChange`] |
//! | **Mediator**    | Action buffering, state cache, fan-out and replay.           | [`Controller`], [`ControllerConfig`]         |
//! | **Contracts**   | One-directional view and model surfaces.                     | [`ViewerController`], [`ModelListener`], [`Model`], [`UpdateReceiver`] |
//! | **Channels**    | Per-view delivery, marshaled onto a host loop.               | [`UpdateChannel`], [`HostUpdater`]           |
//! | **Hosts**       | Explicit "run later on the UI thread" scheduling.            | [`Host`], [`EventLoop`], [`TokioHost`]       |
//! | **Diagnostics** | Sequenced runtime events on a broadcast bus.                 | [`Event`], [`EventKind`], [`Bus`]            |
//! | **Errors**      | Typed errors for malformed actions and closed hosts.         | [`ActionError`], [`HostError`]               |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], which renders bus events as `tracing` records.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use mvcbridge::{
//!     ActionCommand, Controller, ControllerConfig, EventLoop, HostUpdater, Model,
//!     PropertyChange, UpdateChannel, UpdateReceiver,
//! };
//!
//! struct Heater;
//! impl Model for Heater {
//!     fn handle_action(&self, action: ActionCommand) {
//!         println!("model got {} = {}", action.property(), action.value());
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Panel { last: Mutex<Option<PropertyChange>> }
//! impl UpdateReceiver for Panel {
//!     fn update_component(&self, change: &PropertyChange) {
//!         *self.last.lock().unwrap() = Some(change.clone());
//!     }
//! }
//!
//! let model: Arc<dyn Model> = Arc::new(Heater);
//! let ctrl = Controller::builder(ControllerConfig::default())
//!     .with_model(&model)
//!     .build();
//!
//! let ui = EventLoop::spawn("ui").unwrap();
//! let panel = Arc::new(Panel::default());
//! let channel = HostUpdater::arc("panel", panel.clone(), ui.handle());
//! ctrl.register_update_channel(&channel);
//!
//! // view thread
//! ctrl.submit("setpoint", 21.5).unwrap();
//! // model thread
//! ctrl.drain_actions();
//! ctrl.report_property_change("temp", 20.9);
//!
//! ui.shutdown();
//! assert_eq!(panel.last.lock().unwrap().as_ref().unwrap().new.as_number(), Some(20.9));
//! ```

mod actions;
mod channels;
mod contracts;
mod controller;
mod error;
mod events;
mod host;
mod panic_info;

// ---- Public re-exports ----

pub use actions::{ActionCommand, PropertyChange, Value};
pub use channels::{ChannelSet, HostUpdater, UpdateChannel};
pub use contracts::{InteractiveView, Model, ModelListener, UpdateReceiver, ViewerController};
pub use controller::{Controller, ControllerBuilder, ControllerConfig};
pub use error::{ActionError, HostError};
pub use events::{Bus, Event, EventKind};
pub use host::{EventLoop, EventLoopHandle, Host, Job, TokioHost};

// Optional: expose a built-in logging observer.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod observers;
#[cfg(feature = "logging")]
pub use observers::LogWriter;
