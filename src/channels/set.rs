//! # Fan-out of property changes to registered update channels.
//!
//! Provides [`ChannelSet`]: the controller's subscriber set.
//!
//! ## Architecture
//! ```text
//! fan_out(change)
//!     │  (snapshot live channels under read lock, then release it)
//!     ├──► channel 1.deliver(change) ──► host loop 1 ──► view 1
//!     │            └──────► panic → ChannelPanicked, continue
//!     ├──► channel 2.deliver(change) ──► host loop 2 ──► view 2
//!     └──► channel N.deliver(change) ──► ...
//! ```
//!
//! ## Rules
//! - **Set semantics**: a channel is identified by its allocation; registering it
//!   twice keeps one entry.
//! - **Non-owning**: entries are `Weak`; a dropped channel is skipped and pruned.
//! - **Isolation**: a panicking channel does not stop delivery to the others.
//! - **Stable order**: iteration follows registration order.
//! - **No lock held during delivery**: channels may register/unregister from
//!   inside `deliver` without deadlocking.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::actions::PropertyChange;
use crate::channels::UpdateChannel;
use crate::events::{Bus, Event, EventKind};
use crate::panic_info::panic_message;

struct Entry {
    name: Arc<str>,
    channel: Weak<dyn UpdateChannel>,
}

impl Entry {
    fn is(&self, other: &Arc<dyn UpdateChannel>) -> bool {
        self.channel.as_ptr().cast::<()>() == Arc::as_ptr(other).cast::<()>()
    }
}

/// Deduplicated, weakly held set of update channels.
pub struct ChannelSet {
    entries: RwLock<Vec<Entry>>,
    bus: Bus,
}

impl ChannelSet {
    /// Creates an empty set that reports registrations and panics on `bus`.
    pub fn new(bus: Bus) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            bus,
        }
    }

    /// Adds `channel` unless it is already present.
    ///
    /// Returns `true` if the channel was newly added.
    pub fn insert(&self, channel: &Arc<dyn UpdateChannel>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|e| e.channel.strong_count() > 0);

        if entries.iter().any(|e| e.is(channel)) {
            return false;
        }
        let name: Arc<str> = Arc::from(channel.name());
        entries.push(Entry {
            name: Arc::clone(&name),
            channel: Arc::downgrade(channel),
        });
        drop(entries);

        tracing::debug!(channel = %name, "update channel registered");
        self.bus
            .publish(Event::new(EventKind::ChannelRegistered).with_channel(name));
        true
    }

    /// Removes `channel`. Returns `true` if it was present.
    pub fn remove(&self, channel: &Arc<dyn UpdateChannel>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(idx) = entries.iter().position(|e| e.is(channel)) else {
            return false;
        };
        let entry = entries.remove(idx);
        drop(entries);

        tracing::debug!(channel = %entry.name, "update channel unregistered");
        self.bus
            .publish(Event::new(EventKind::ChannelUnregistered).with_channel(entry.name));
        true
    }

    /// Number of registered channels that are still alive.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.channel.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers `change` to every live channel.
    ///
    /// Returns the number of channels that accepted it without panicking.
    pub fn fan_out(&self, change: &PropertyChange) -> usize {
        let (live, has_dead) = self.snapshot();
        if has_dead {
            self.prune();
        }

        let mut delivered = 0;
        for ch in &live {
            if deliver_isolated(&**ch, change.clone(), &self.bus) {
                delivered += 1;
            }
        }
        delivered
    }

    fn snapshot(&self) -> (Vec<Arc<dyn UpdateChannel>>, bool) {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let live: Vec<_> = entries.iter().filter_map(|e| e.channel.upgrade()).collect();
        let has_dead = live.len() != entries.len();
        (live, has_dead)
    }

    fn prune(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|e| {
            let alive = e.channel.strong_count() > 0;
            if !alive {
                tracing::debug!(channel = %e.name, "pruned dropped update channel");
            }
            alive
        });
    }
}

/// Calls `channel.deliver(change)`, containing a panic.
///
/// Returns `false` if the channel panicked (reported on `bus`).
pub(crate) fn deliver_isolated(
    channel: &dyn UpdateChannel,
    change: PropertyChange,
    bus: &Bus,
) -> bool {
    let property = Arc::clone(&change.property);

    match catch_unwind(AssertUnwindSafe(|| channel.deliver(change))) {
        Ok(()) => true,
        Err(panic_err) => {
            let info = panic_message(&*panic_err);
            tracing::warn!(
                channel = channel.name(),
                property = %property,
                panic = %info,
                "update channel panicked"
            );
            bus.publish(Event::channel_panicked(channel.name(), &property, info));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Value;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect {
        seen: Mutex<Vec<PropertyChange>>,
    }

    impl UpdateChannel for Collect {
        fn deliver(&self, change: PropertyChange) {
            self.seen.lock().unwrap().push(change);
        }
    }

    struct Explode;

    impl UpdateChannel for Explode {
        fn deliver(&self, _change: PropertyChange) {
            panic!("render failed");
        }

        fn name(&self) -> &str {
            "explode"
        }
    }

    #[test]
    fn test_insert_is_idempotent() {
        let set = ChannelSet::new(Bus::new(16));
        let ch: Arc<dyn UpdateChannel> = Arc::new(Collect::default());

        assert!(set.insert(&ch));
        assert!(!set.insert(&ch));
        assert_eq!(set.len(), 1);

        let other: Arc<dyn UpdateChannel> = Arc::new(Collect::default());
        assert!(set.insert(&other));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_dropped_channel_is_skipped_and_pruned() {
        let set = ChannelSet::new(Bus::new(16));
        let kept = Arc::new(Collect::default());
        let kept_dyn: Arc<dyn UpdateChannel> = kept.clone();
        let gone: Arc<dyn UpdateChannel> = Arc::new(Collect::default());

        set.insert(&kept_dyn);
        set.insert(&gone);
        drop(gone);

        assert_eq!(set.fan_out(&PropertyChange::new("x", 1)), 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries.read().unwrap().len(), 1);
        assert_eq!(kept.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_panicking_channel_is_isolated() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let set = ChannelSet::new(bus);

        let bad: Arc<dyn UpdateChannel> = Arc::new(Explode);
        let good = Arc::new(Collect::default());
        let good_dyn: Arc<dyn UpdateChannel> = good.clone();
        set.insert(&bad);
        set.insert(&good_dyn);

        assert_eq!(set.fan_out(&PropertyChange::new("on", true)), 1);
        assert_eq!(good.seen.lock().unwrap()[0].new, Value::Bool(true));

        let mut panicked = None;
        while let Ok(ev) = rx.try_recv() {
            if ev.is_panic() {
                panicked = Some(ev);
            }
        }
        let ev = panicked.expect("panic event");
        assert_eq!(ev.channel.as_deref(), Some("explode"));
        assert_eq!(ev.reason.as_deref(), Some("render failed"));
    }

    #[test]
    fn test_remove() {
        let set = ChannelSet::new(Bus::new(16));
        let ch: Arc<dyn UpdateChannel> = Arc::new(Collect::default());

        assert!(!set.remove(&ch));
        set.insert(&ch);
        assert!(set.remove(&ch));
        assert!(set.is_empty());
    }
}
