//! # HostUpdater: marshals changes onto a host loop
//!
//! Wraps one view and one [`Host`]. Every delivered change becomes a job on
//! the host loop that calls [`UpdateReceiver::update_component`]; `deliver`
//! returns as soon as the job is queued.
//!
//! ## Flow
//! ```text
//! model thread:  Controller ── deliver(change) ──► HostUpdater ── post(job) ──┐
//!                                                                             ▼
//! host thread:                                   view.update_component(&change)
//! ```
//!
//! Order per channel follows from the host queue being FIFO.

use std::sync::Arc;

use crate::actions::PropertyChange;
use crate::channels::UpdateChannel;
use crate::contracts::UpdateReceiver;
use crate::host::Host;

/// Update channel that runs the view's handler on a host loop.
pub struct HostUpdater {
    name: Arc<str>,
    view: Arc<dyn UpdateReceiver>,
    host: Arc<dyn Host>,
}

impl HostUpdater {
    /// Creates an updater for `view`, scheduling on `host`.
    pub fn new(
        name: impl Into<Arc<str>>,
        view: Arc<dyn UpdateReceiver>,
        host: impl Host,
    ) -> Self {
        Self {
            name: name.into(),
            view,
            host: Arc::new(host),
        }
    }

    /// Convenience: builds the updater already shared as a channel handle.
    pub fn arc(
        name: impl Into<Arc<str>>,
        view: Arc<dyn UpdateReceiver>,
        host: impl Host,
    ) -> Arc<dyn UpdateChannel> {
        Arc::new(Self::new(name, view, host))
    }
}

impl UpdateChannel for HostUpdater {
    fn deliver(&self, change: PropertyChange) {
        let view = Arc::clone(&self.view);
        let property = Arc::clone(&change.property);

        if let Err(e) = self
            .host
            .post(Box::new(move || view.update_component(&change)))
        {
            tracing::debug!(
                channel = %self.name,
                property = %property,
                error = e.as_label(),
                "update dropped"
            );
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::EventLoop;
    use std::sync::Mutex;
    use std::thread::ThreadId;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(PropertyChange, ThreadId)>>,
    }

    impl UpdateReceiver for Recorder {
        fn update_component(&self, change: &PropertyChange) {
            self.seen
                .lock()
                .unwrap()
                .push((change.clone(), std::thread::current().id()));
        }
    }

    #[test]
    fn test_updates_run_on_host_thread_in_order() {
        let el = EventLoop::spawn("ui").expect("spawn");
        let view = Arc::new(Recorder::default());
        let updater = HostUpdater::new("main", view.clone(), el.handle());

        for i in 0..20 {
            updater.deliver(PropertyChange::new("level", i));
        }
        el.handle().flush().expect("flush");

        let seen = view.seen.lock().unwrap();
        let values: Vec<_> = seen.iter().map(|(c, _)| c.new.clone()).collect();
        let expected: Vec<_> = (0..20).map(crate::Value::from).collect();
        assert_eq!(values, expected);
        assert!(seen.iter().all(|(_, t)| *t != std::thread::current().id()));
    }

    #[test]
    fn test_deliver_after_host_shutdown_is_dropped() {
        let el = EventLoop::spawn("ui").expect("spawn");
        let handle = el.handle();
        let view = Arc::new(Recorder::default());
        let updater = HostUpdater::new("main", view.clone(), handle);
        el.shutdown();

        updater.deliver(PropertyChange::new("level", 1));
        assert!(view.seen.lock().unwrap().is_empty());
    }
}
