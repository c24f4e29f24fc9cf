//! # Controller: mediator between views and the model.
//!
//! ## Architecture
//! ```text
//! view threads                        Controller                          model thread
//! ────────────                        ──────────                          ────────────
//! submit_action(ac) ──► PendingActions.push ──► model.update_notification(name)
//!                                     │
//!                                     └───────────── drain_actions() ◄── model schedule
//!                                                        └─► model.handle_action(ac) (FIFO)
//!
//! view ◄── host loop ◄── ChannelSet.fan_out ◄── cache.insert ◄── report_property_change(name, v)
//!
//! new window ──► register_update_channel(ch) + replay_cached_state_to(ch) ──► one change per cached name
//! ```
//!
//! ## Rules
//! - Buffer, cache and channel set are locked independently; no cache or set
//!   lock is held while calling the model, a channel or a view.
//! - Fan-out and replay are serialized by a reentrant publish lock, so a replay
//!   never delivers a value older than one already fanned out to the same channel.
//!   Replay reads each value at delivery time; a report made from inside
//!   `deliver` on the replaying thread is seen by the rest of the replay.
//! - Every submitted action is handed to the model exactly once, in submission
//!   order. Actions submitted during a drain are left for the next drain.
//! - The cache is written **before** fan-out, so a channel that registers while
//!   a change is being delivered still sees it on replay.
//! - `drain_actions` is meant for a single model thread. A drain that overlaps
//!   another is refused (returns 0, logs a warning, publishes `DrainRejected`);
//!   overlapping drains have no ordering guarantee and are not supported.
//! - The controller holds only weak references to the model and to channels.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use parking_lot::ReentrantMutex;

use crate::actions::{ActionCommand, PropertyChange, Value};
use crate::channels::{ChannelSet, UpdateChannel, deliver_isolated};
use crate::contracts::{Model, ModelListener, ViewerController};
use crate::error::ActionError;
use crate::events::{Bus, Event, EventKind};
use crate::panic_info::panic_message;

use super::builder::ControllerBuilder;
use super::config::ControllerConfig;
use super::pending::PendingActions;

/// Routes actions from views to the model and property changes from the model to views.
///
/// Share it as `Arc<Controller>`; hand views an `Arc<dyn ViewerController>` and
/// the model an `Arc<dyn ModelListener>`.
pub struct Controller {
    config: ControllerConfig,
    bus: Bus,

    pending: PendingActions,
    cache: RwLock<HashMap<Arc<str>, Value>>,
    channels: ChannelSet,
    publish: ReentrantMutex<()>,
    model: RwLock<Option<Weak<dyn Model>>>,
}

impl Controller {
    /// Creates a controller with no model and no channels.
    pub fn new(config: ControllerConfig) -> Self {
        let bus = Bus::new(config.bus_capacity_clamped());
        Self {
            pending: PendingActions::new(config.pending_warn_limit()),
            cache: RwLock::new(HashMap::new()),
            channels: ChannelSet::new(bus.clone()),
            publish: ReentrantMutex::new(()),
            model: RwLock::new(None),
            config,
            bus,
        }
    }

    /// Returns a builder for wiring a model and initial channels.
    pub fn builder(config: ControllerConfig) -> ControllerBuilder {
        ControllerBuilder::new(config)
    }

    // ---- View side ----

    /// Buffers `action` and notifies the model that it is pending.
    ///
    /// Never blocks beyond the buffer lock and never drops an action.
    pub fn submit_action(&self, action: ActionCommand) {
        let property = action.shared_property();
        let len = self.pending.push(action);

        if let Some(model) = self.model() {
            model.update_notification(&property);
        }

        tracing::trace!(property = %property, pending = len, "action submitted");
        self.bus.publish(
            Event::new(EventKind::ActionSubmitted)
                .with_property(property)
                .with_count(len),
        );
    }

    /// Builds an action from `property` and `value` and submits it.
    ///
    /// # Errors
    /// Returns [`ActionError::EmptyPropertyName`] if `property` is empty; nothing is buffered.
    pub fn submit(
        &self,
        property: impl Into<Arc<str>>,
        value: impl Into<Value>,
    ) -> Result<(), ActionError> {
        let action = ActionCommand::new(property, value)?;
        self.submit_action(action);
        Ok(())
    }

    /// Registers `channel` (no-op if already registered).
    ///
    /// Returns `true` if the channel was newly added.
    pub fn register_update_channel(&self, channel: &Arc<dyn UpdateChannel>) -> bool {
        self.channels.insert(channel)
    }

    /// Unregisters `channel`. Returns `true` if it was registered.
    pub fn unregister_update_channel(&self, channel: &Arc<dyn UpdateChannel>) -> bool {
        self.channels.remove(channel)
    }

    /// Sends one change per cached property to `channel`, carrying its latest value.
    ///
    /// Order is unspecified. Replayed changes have no `old` value.
    /// Returns the number of changes delivered.
    pub fn replay_cached_state_to(&self, channel: &dyn UpdateChannel) -> usize {
        let _publish_guard = self.publish.lock();
        let properties: Vec<Arc<str>> = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();

        let mut sent = 0;
        for property in properties {
            let Some(value) = self.last_known_value(&property) else {
                continue;
            };
            if deliver_isolated(channel, PropertyChange::new(property, value), &self.bus) {
                sent += 1;
            }
        }

        tracing::debug!(channel = channel.name(), count = sent, "cached state replayed");
        self.bus.publish(
            Event::new(EventKind::StateReplayed)
                .with_channel(channel.name())
                .with_count(sent),
        );
        sent
    }

    // ---- Model side ----

    /// Registers the model that receives actions.
    ///
    /// Only a weak reference is kept; replaces any previous model.
    pub fn register_model(&self, model: &Arc<dyn Model>) {
        *self.model.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::downgrade(model));
        tracing::debug!("model registered");
    }

    /// Hands every buffered action to the model, oldest first.
    ///
    /// Returns the number of actions handed over. Returns 0 without touching the
    /// buffer when no model is alive or when another drain is in progress.
    pub fn drain_actions(&self) -> usize {
        let Some(_guard) = self.pending.try_begin_drain() else {
            tracing::warn!("concurrent drain_actions refused; drain from one model thread only");
            self.bus.publish(
                Event::new(EventKind::DrainRejected).with_reason("drain already in progress"),
            );
            return 0;
        };
        let Some(model) = self.model() else {
            tracing::debug!(pending = self.pending.len(), "drain skipped: no model registered");
            return 0;
        };

        let batch = self.pending.take_all();
        if batch.is_empty() {
            return 0;
        }

        let count = batch.len();
        for action in batch {
            let property = action.shared_property();
            if let Err(panic_err) = catch_unwind(AssertUnwindSafe(|| model.handle_action(action))) {
                let info = panic_message(&*panic_err);
                tracing::warn!(property = %property, panic = %info, "model action handler panicked");
                self.bus.publish(Event::model_panicked(&property, info));
            }
        }

        tracing::debug!(count, "actions drained");
        self.bus
            .publish(Event::new(EventKind::ActionsDrained).with_count(count));
        count
    }

    /// Caches `value` for `property` and delivers the change to every channel.
    ///
    /// The delivered [`PropertyChange`] carries the previously cached value as `old`.
    pub fn report_property_change(&self, property: impl Into<Arc<str>>, value: impl Into<Value>) {
        let property: Arc<str> = property.into();
        let value: Value = value.into();

        let publish_guard = self.publish.lock();
        let old = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(Arc::clone(&property), value.clone());

        let change = PropertyChange::new(Arc::clone(&property), value).with_old(old);
        let delivered = self.channels.fan_out(&change);
        drop(publish_guard);

        tracing::trace!(
            property = %property,
            kind = change.new.kind(),
            channels = delivered,
            "property changed"
        );
        self.bus.publish(
            Event::new(EventKind::PropertyChanged)
                .with_property(property)
                .with_count(delivered),
        );
    }

    /// Last value reported for `property`.
    ///
    /// `None` means the property was never reported; a reported null is
    /// `Some(Value::None)`.
    pub fn last_known_value(&self, property: &str) -> Option<Value> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(property)
            .cloned()
    }

    // ---- Introspection ----

    /// Number of actions waiting for the next drain.
    pub fn pending_actions(&self) -> usize {
        self.pending.len()
    }

    /// Number of live registered channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Diagnostic event bus.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Configuration this controller was built with.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    fn model(&self) -> Option<Arc<dyn Model>> {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl ViewerController for Controller {
    fn submit_action(&self, action: ActionCommand) {
        Controller::submit_action(self, action);
    }

    fn register_update_channel(&self, channel: &Arc<dyn UpdateChannel>) -> bool {
        Controller::register_update_channel(self, channel)
    }

    fn unregister_update_channel(&self, channel: &Arc<dyn UpdateChannel>) -> bool {
        Controller::unregister_update_channel(self, channel)
    }

    fn replay_cached_state_to(&self, channel: &dyn UpdateChannel) -> usize {
        Controller::replay_cached_state_to(self, channel)
    }
}

impl ModelListener for Controller {
    fn report_property_change(&self, property: &str, value: Value) {
        Controller::report_property_change(self, property, value);
    }

    fn last_known_value(&self, property: &str) -> Option<Value> {
        Controller::last_known_value(self, property)
    }

    fn drain_actions(&self) -> usize {
        Controller::drain_actions(self)
    }

    fn register_model(&self, model: &Arc<dyn Model>) {
        Controller::register_model(self, model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingModel {
        notices: Mutex<Vec<String>>,
        handled: Mutex<Vec<ActionCommand>>,
    }

    impl Model for RecordingModel {
        fn update_notification(&self, property: &str) {
            self.notices.lock().unwrap().push(property.to_string());
        }

        fn handle_action(&self, action: ActionCommand) {
            if action.property() == "explode" {
                panic!("bad action");
            }
            self.handled.lock().unwrap().push(action);
        }
    }

    #[derive(Default)]
    struct Collect {
        seen: Mutex<Vec<PropertyChange>>,
    }

    impl UpdateChannel for Collect {
        fn deliver(&self, change: PropertyChange) {
            self.seen.lock().unwrap().push(change);
        }
    }

    fn wired() -> (Controller, Arc<RecordingModel>) {
        let ctrl = Controller::default();
        let model = Arc::new(RecordingModel::default());
        let as_dyn: Arc<dyn Model> = model.clone();
        ctrl.register_model(&as_dyn);
        (ctrl, model)
    }

    #[test]
    fn test_submit_notifies_model_with_name_only() {
        let (ctrl, model) = wired();
        ctrl.submit("speed", 10).unwrap();

        assert_eq!(*model.notices.lock().unwrap(), vec!["speed".to_string()]);
        assert!(model.handled.lock().unwrap().is_empty());
        assert_eq!(ctrl.pending_actions(), 1);
    }

    #[test]
    fn test_drain_empty_is_noop() {
        let (ctrl, model) = wired();
        assert_eq!(ctrl.drain_actions(), 0);
        assert!(model.handled.lock().unwrap().is_empty());
    }

    #[test]
    fn test_drain_without_model_keeps_buffer() {
        let ctrl = Controller::default();
        ctrl.submit("speed", 1).unwrap();

        assert_eq!(ctrl.drain_actions(), 0);
        assert_eq!(ctrl.pending_actions(), 1);
    }

    #[test]
    fn test_dropped_model_is_not_kept_alive() {
        let (ctrl, model) = wired();
        drop(model);
        ctrl.submit("speed", 1).unwrap();
        assert_eq!(ctrl.drain_actions(), 0);
    }

    #[test]
    fn test_model_panic_does_not_lose_rest_of_drain() {
        let (ctrl, model) = wired();
        let mut rx = ctrl.bus().subscribe();

        ctrl.submit("a", 1).unwrap();
        ctrl.submit("explode", 2).unwrap();
        ctrl.submit("b", 3).unwrap();
        assert_eq!(ctrl.drain_actions(), 3);

        let names: Vec<_> = model
            .handled
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.property().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::ModelPanicked));
        assert_eq!(kinds.last(), Some(&EventKind::ActionsDrained));
    }

    #[test]
    fn test_report_carries_previous_value_as_old() {
        let ctrl = Controller::default();
        let ch = Arc::new(Collect::default());
        let ch_dyn: Arc<dyn UpdateChannel> = ch.clone();
        ctrl.register_update_channel(&ch_dyn);

        ctrl.report_property_change("temp", 36.6);
        ctrl.report_property_change("temp", 37.0);

        let seen = ch.seen.lock().unwrap();
        assert_eq!(seen[0].old, None);
        assert_eq!(seen[1].old, Some(Value::Number(36.6)));
        assert_eq!(seen[1].new, Value::Number(37.0));
    }

    #[test]
    fn test_cached_null_is_distinct_from_absent() {
        let ctrl = Controller::default();
        ctrl.report_property_change("label", Value::None);

        assert_eq!(ctrl.last_known_value("label"), Some(Value::None));
        assert_eq!(ctrl.last_known_value("never"), None);
    }

    #[test]
    fn test_unregistered_channel_stops_receiving() {
        let ctrl = Controller::default();
        let ch = Arc::new(Collect::default());
        let ch_dyn: Arc<dyn UpdateChannel> = ch.clone();

        assert!(ctrl.register_update_channel(&ch_dyn));
        ctrl.report_property_change("on", true);
        assert!(ctrl.unregister_update_channel(&ch_dyn));
        ctrl.report_property_change("on", false);

        assert_eq!(ch.seen.lock().unwrap().len(), 1);
        assert_eq!(ctrl.channel_count(), 0);
    }

    #[test]
    fn test_overlapping_drain_is_refused() {
        struct Reentrant {
            ctrl: Mutex<Option<Arc<Controller>>>,
            nested: Mutex<Option<usize>>,
        }

        impl Model for Reentrant {
            fn handle_action(&self, _action: ActionCommand) {
                let ctrl = self.ctrl.lock().unwrap().clone();
                if let Some(ctrl) = ctrl {
                    *self.nested.lock().unwrap() = Some(ctrl.drain_actions());
                }
            }
        }

        let ctrl = Arc::new(Controller::default());
        let model = Arc::new(Reentrant {
            ctrl: Mutex::new(Some(Arc::clone(&ctrl))),
            nested: Mutex::new(None),
        });
        let as_dyn: Arc<dyn Model> = model.clone();
        ctrl.register_model(&as_dyn);
        let mut rx = ctrl.bus().subscribe();

        ctrl.submit("x", 1).unwrap();
        ctrl.submit("y", 2).unwrap();
        assert_eq!(ctrl.drain_actions(), 2);
        assert_eq!(*model.nested.lock().unwrap(), Some(0));

        let mut rejected = false;
        while let Ok(ev) = rx.try_recv() {
            rejected |= ev.kind == EventKind::DrainRejected;
        }
        assert!(rejected);

        model.ctrl.lock().unwrap().take();
    }

    #[test]
    fn test_config_is_kept() {
        let ctrl = Controller::new(ControllerConfig {
            pending_warn_threshold: 8,
            ..ControllerConfig::default()
        });
        assert_eq!(ctrl.config().pending_warn_threshold, 8);
        assert_eq!(ctrl.config().bus_capacity, 256);
    }
}
