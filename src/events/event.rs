//! # Runtime events emitted by the controller.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Action events**: view → model traffic (submitted, drained, rejected drain)
//! - **Update events**: model → view traffic (property changed, state replayed)
//! - **Channel events**: registration bookkeeping and isolated failures
//!
//! The [`Event`] struct carries additional metadata such as timestamps,
//! property and channel names, counts and reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are observed out of order.
//!
//! ## Example
//! ```rust
//! use mvcbridge::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ChannelPanicked)
//!     .with_channel("main-window")
//!     .with_property("temp")
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::ChannelPanicked);
//! assert_eq!(ev.channel.as_deref(), Some("main-window"));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Action events ===
    /// A view submitted an action; it is now buffered.
    ///
    /// Sets:
    /// - `property`: action property name
    /// - `count`: buffer length after the push
    ActionSubmitted,

    /// The model drained the action buffer.
    ///
    /// Sets:
    /// - `count`: number of actions delivered
    ActionsDrained,

    /// A drain started while another drain was in progress and was refused.
    ///
    /// Sets:
    /// - `reason`: short explanation
    DrainRejected,

    /// The model's action handler panicked; the drain went on.
    ///
    /// Sets:
    /// - `property`: property of the action being handled
    /// - `reason`: panic message
    ModelPanicked,

    // === Update events ===
    /// The model reported a property change and it was fanned out.
    ///
    /// Sets:
    /// - `property`: property name
    /// - `count`: number of channels the change was delivered to
    PropertyChanged,

    /// Cached state was replayed to a channel.
    ///
    /// Sets:
    /// - `channel`: channel name
    /// - `count`: number of properties replayed
    StateReplayed,

    // === Channel events ===
    /// A new update channel was registered.
    ///
    /// Sets:
    /// - `channel`: channel name
    ChannelRegistered,

    /// An update channel was unregistered.
    ///
    /// Sets:
    /// - `channel`: channel name
    ChannelUnregistered,

    /// An update channel panicked during delivery; other channels were unaffected.
    ///
    /// Sets:
    /// - `channel`: channel name
    /// - `property`: property being delivered
    /// - `reason`: panic message
    ChannelPanicked,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Property name, if applicable.
    pub property: Option<Arc<str>>,
    /// Update channel name, if applicable.
    pub channel: Option<Arc<str>>,
    /// Number of items involved (actions, channels, properties).
    pub count: Option<u32>,
    /// Human-readable reason (panics, rejections).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            property: None,
            channel: None,
            count: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_property(mut self, property: impl Into<Arc<str>>) -> Self {
        self.property = Some(property.into());
        self
    }

    #[inline]
    pub fn with_channel(mut self, channel: impl Into<Arc<str>>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Attaches a count (saturates at `u32::MAX`).
    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a channel panic event.
    #[inline]
    pub fn channel_panicked(channel: &str, property: &str, info: String) -> Self {
        Event::new(EventKind::ChannelPanicked)
            .with_channel(channel)
            .with_property(property)
            .with_reason(info)
    }

    /// Creates a model panic event.
    #[inline]
    pub fn model_panicked(property: &str, info: String) -> Self {
        Event::new(EventKind::ModelPanicked)
            .with_property(property)
            .with_reason(info)
    }

    #[inline]
    pub fn is_panic(&self) -> bool {
        matches!(
            self.kind,
            EventKind::ChannelPanicked | EventKind::ModelPanicked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::ActionSubmitted);
        let b = Event::new(EventKind::ActionsDrained);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_count_saturates() {
        let ev = Event::new(EventKind::ActionsDrained).with_count(usize::MAX);
        assert_eq!(ev.count, Some(u32::MAX));
    }
}
