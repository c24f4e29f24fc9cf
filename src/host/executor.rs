//! # Host loop abstraction.
//!
//! A [`Host`] accepts jobs and runs them later on its own execution context
//! (a UI thread, a runtime worker). It is the explicit form of "invoke later
//! on the event thread", so that views can be driven without a real GUI.
//!
//! ## Contract
//! - `post` never waits for the job to run.
//! - Jobs posted to one host run in posting order (FIFO).
//! - A panicking job is contained by the host and does not stop the loop.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::error::HostError;
use crate::panic_info::panic_message;

/// Unit of work scheduled onto a host loop.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Execution context that runs posted jobs asynchronously, in order.
pub trait Host: Send + Sync + 'static {
    /// Schedules `job` and returns immediately.
    ///
    /// # Errors
    /// Returns [`HostError::Closed`] if the loop no longer accepts jobs.
    fn post(&self, job: Job) -> Result<(), HostError>;

    /// Human-readable name (for logs).
    fn name(&self) -> &str;
}

/// Runs one job, containing any panic.
pub(super) fn run_job(host: &str, job: Job) {
    if let Err(panic_err) = catch_unwind(AssertUnwindSafe(job)) {
        tracing::warn!(
            host,
            panic = %panic_message(&*panic_err),
            "host job panicked"
        );
    }
}
