//! # Dedicated-thread host loop.
//!
//! [`EventLoop`] owns one OS thread that plays the role of a UI event thread:
//! every posted job runs there, one at a time, in posting order.
//!
//! ## Architecture
//! ```text
//! model thread ── post(job) ──┐
//! view thread  ── post(job) ──┼──► [unbounded FIFO] ──► loop thread ──► job()
//! ...                         ┘                              └──► panic → warn, continue
//! ```
//!
//! ## Rules
//! - **Non-blocking**: `post()` returns immediately.
//! - **FIFO**: a single queue per loop; jobs never overtake each other.
//! - **Graceful stop**: [`EventLoop::shutdown`] lets already-posted jobs run, then joins.
//! - Jobs posted after shutdown are dropped; once the thread is gone `post()`
//!   returns [`HostError::Closed`].

use std::sync::Arc;
use std::thread::JoinHandle;

use tokio::sync::{mpsc, oneshot};

use super::executor::{Host, Job, run_job};
use crate::error::HostError;

enum Msg {
    Run(Job),
    Stop,
}

/// Cloneable posting side of an [`EventLoop`].
#[derive(Clone)]
pub struct EventLoopHandle {
    name: Arc<str>,
    tx: mpsc::UnboundedSender<Msg>,
}

impl EventLoopHandle {
    /// Blocks until every job posted before this call has run.
    ///
    /// Must not be called from the loop thread itself, nor from inside a tokio
    /// runtime (blocking there panics); use [`flush_async`](Self::flush_async) instead.
    ///
    /// # Errors
    /// Returns [`HostError::Closed`] if the loop stopped first.
    pub fn flush(&self) -> Result<(), HostError> {
        self.post_marker()?
            .blocking_recv()
            .map_err(|_| self.closed())
    }

    /// Async variant of [`flush`](Self::flush) for callers running on a tokio runtime.
    ///
    /// # Errors
    /// Returns [`HostError::Closed`] if the loop stopped first.
    pub async fn flush_async(&self) -> Result<(), HostError> {
        self.post_marker()?.await.map_err(|_| self.closed())
    }

    fn post_marker(&self) -> Result<oneshot::Receiver<()>, HostError> {
        let (done_tx, done_rx) = oneshot::channel::<()>();
        self.post(Box::new(move || {
            let _ = done_tx.send(());
        }))?;
        Ok(done_rx)
    }

    /// Returns `true` once the loop thread has exited.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn closed(&self) -> HostError {
        HostError::Closed {
            host: self.name.to_string(),
        }
    }
}

impl Host for EventLoopHandle {
    fn post(&self, job: Job) -> Result<(), HostError> {
        self.tx.send(Msg::Run(job)).map_err(|_| self.closed())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Host loop running on its own named thread.
pub struct EventLoop {
    handle: EventLoopHandle,
    thread: Option<JoinHandle<()>>,
}

impl EventLoop {
    /// Starts the loop thread.
    ///
    /// # Errors
    /// Returns [`HostError::Spawn`] if the OS refuses to create the thread.
    pub fn spawn(name: impl Into<String>) -> Result<Self, HostError> {
        let name: String = name.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<Msg>();
        let loop_name = name.clone();

        let thread = std::thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                while let Some(msg) = rx.blocking_recv() {
                    match msg {
                        Msg::Run(job) => run_job(&loop_name, job),
                        Msg::Stop => break,
                    }
                }
                tracing::debug!(host = %loop_name, "event loop stopped");
            })
            .map_err(|e| HostError::Spawn {
                host: name.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            handle: EventLoopHandle {
                name: Arc::from(name),
                tx,
            },
            thread: Some(thread),
        })
    }

    /// Returns a cloneable handle for posting jobs.
    pub fn handle(&self) -> EventLoopHandle {
        self.handle.clone()
    }

    /// Runs every job already posted, then stops and joins the thread.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        let _ = self.handle.tx.send(Msg::Stop);
        if let Some(thread) = self.thread.take() {
            if thread.thread().id() == std::thread::current().id() {
                return;
            }
            if thread.join().is_err() {
                tracing::warn!(host = %self.handle.name, "event loop thread panicked");
            }
        }
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_jobs_run_in_posting_order_on_loop_thread() {
        let el = EventLoop::spawn("ui-test").expect("spawn");
        let h = el.handle();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..50 {
            let seen = Arc::clone(&seen);
            h.post(Box::new(move || {
                let thread = std::thread::current();
                assert_eq!(thread.name(), Some("ui-test"));
                seen.lock().unwrap().push(i);
            }))
            .expect("post");
        }
        h.flush().expect("flush");

        assert_eq!(*seen.lock().unwrap(), (0..50).collect::<Vec<_>>());
        el.shutdown();
    }

    #[test]
    fn test_panicking_job_does_not_stop_loop() {
        let el = EventLoop::spawn("ui-panic").expect("spawn");
        let h = el.handle();
        let ran = Arc::new(Mutex::new(false));

        h.post(Box::new(|| panic!("boom"))).expect("post");
        let flag = Arc::clone(&ran);
        h.post(Box::new(move || *flag.lock().unwrap() = true))
            .expect("post");
        h.flush().expect("flush");

        assert!(*ran.lock().unwrap());
    }

    #[test]
    fn test_shutdown_runs_pending_then_closes() {
        let el = EventLoop::spawn("ui-stop").expect("spawn");
        let h = el.handle();
        let count = Arc::new(Mutex::new(0));

        for _ in 0..10 {
            let count = Arc::clone(&count);
            h.post(Box::new(move || *count.lock().unwrap() += 1))
                .expect("post");
        }
        el.shutdown();

        assert_eq!(*count.lock().unwrap(), 10);
        assert!(h.is_closed());
        assert!(matches!(
            h.post(Box::new(|| {})),
            Err(HostError::Closed { .. })
        ));
    }

    #[tokio::test]
    async fn test_flush_async_from_runtime() {
        let el = EventLoop::spawn("ui-async").expect("spawn");
        let h = el.handle();
        let count = Arc::new(Mutex::new(0));

        for _ in 0..5 {
            let count = Arc::clone(&count);
            h.post(Box::new(move || *count.lock().unwrap() += 1))
                .expect("post");
        }
        h.flush_async().await.expect("flush");
        assert_eq!(*count.lock().unwrap(), 5);

        el.shutdown();
        assert!(matches!(
            h.flush_async().await,
            Err(HostError::Closed { .. })
        ));
    }
}
