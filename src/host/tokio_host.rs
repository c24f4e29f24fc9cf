//! # Host loop on a tokio runtime.
//!
//! For applications whose "UI thread" is an async runtime. A single worker
//! task drains an unbounded queue, so jobs from one [`TokioHost`] keep their
//! posting order even on a multi-threaded runtime.
//!
//! ## Shutdown
//! The worker exits when the [`CancellationToken`] is cancelled (pending jobs
//! are dropped) or when every clone of the host has been dropped (pending jobs
//! run first).

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::executor::{Host, Job, run_job};
use crate::error::HostError;

/// Cloneable host backed by one tokio worker task.
#[derive(Clone)]
pub struct TokioHost {
    name: Arc<str>,
    tx: mpsc::UnboundedSender<Job>,
}

impl TokioHost {
    /// Spawns the worker on `runtime` and returns the host with the worker handle.
    pub fn spawn(
        name: impl Into<Arc<str>>,
        runtime: &Handle,
        token: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        let name: Arc<str> = name.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let worker_name = Arc::clone(&name);

        let worker = runtime.spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    job = rx.recv() => match job {
                        Some(job) => run_job(&worker_name, job),
                        None => break,
                    }
                }
            }
            tracing::debug!(host = %worker_name, "tokio host stopped");
        });

        (Self { name, tx }, worker)
    }
}

impl Host for TokioHost {
    fn post(&self, job: Job) -> Result<(), HostError> {
        self.tx.send(job).map_err(|_| HostError::Closed {
            host: self.name.to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_jobs_keep_order_on_multi_thread_runtime() {
        let token = CancellationToken::new();
        let (host, worker) = TokioHost::spawn("async-ui", &Handle::current(), token);
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..100 {
            let seen = Arc::clone(&seen);
            host.post(Box::new(move || seen.lock().unwrap().push(i)))
                .expect("post");
        }
        drop(host);
        worker.await.expect("worker");

        assert_eq!(*seen.lock().unwrap(), (0..100).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_post_after_cancel_is_closed() {
        let token = CancellationToken::new();
        let (host, worker) = TokioHost::spawn("async-ui", &Handle::current(), token.clone());

        token.cancel();
        worker.await.expect("worker");

        assert!(matches!(
            host.post(Box::new(|| {})),
            Err(HostError::Closed { .. })
        ));
    }
}
