//! # Host loops: where view updates actually run.
//!
//! - [`Host`] trait: "post this job to my execution context, don't wait"
//! - [`EventLoop`] / [`EventLoopHandle`]: a dedicated thread acting as UI thread
//! - [`TokioHost`]: an ordered worker task on a tokio runtime
//!
//! ```text
//! model thread ── HostUpdater::deliver ── Host::post ──► host loop ──► view.update_component
//! ```

mod event_loop;
mod executor;
mod tokio_host;

pub use event_loop::{EventLoop, EventLoopHandle};
pub use executor::{Host, Job};
pub use tokio_host::TokioHost;
