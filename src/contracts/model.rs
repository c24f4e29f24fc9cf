//! # Model-side contracts.
//!
//! - [`Model`] is implemented by the application model; the controller calls it.
//! - [`ModelListener`] is the controller surface a model is allowed to use.
//!
//! A model never sees a view. It reports changes through its
//! `Arc<dyn ModelListener>` and pulls pending actions on its own schedule.

use std::sync::Arc;

use crate::actions::{ActionCommand, Value};

/// Application model driven by the controller.
///
/// # Example
/// ```
/// use std::sync::{Arc, Mutex};
/// use mvcbridge::{ActionCommand, Model};
///
/// #[derive(Default)]
/// struct Pump { speed: Mutex<f64> }
///
/// impl Model for Pump {
///     fn handle_action(&self, action: ActionCommand) {
///         if let Some(v) = action.value().as_number() {
///             *self.speed.lock().unwrap() = v;
///         }
///     }
/// }
/// ```
pub trait Model: Send + Sync + 'static {
    /// Notice that an action for `property` is now pending.
    ///
    /// Called synchronously on the **view** thread right after the action was
    /// buffered. Keep it cheap: wake the model loop, set a flag, nothing more.
    fn update_notification(&self, property: &str) {
        let _ = property;
    }

    /// Handles one drained action.
    ///
    /// Called from [`ModelListener::drain_actions`], on whatever thread the
    /// model drains from. Never called from a view thread by the controller.
    fn handle_action(&self, action: ActionCommand);
}

/// Controller operations available to a model.
pub trait ModelListener: Send + Sync {
    /// Caches `value` for `property` and fans it out to every update channel.
    fn report_property_change(&self, property: &str, value: Value);

    /// Last value reported for `property`, or `None` if it was never reported.
    fn last_known_value(&self, property: &str) -> Option<Value>;

    /// Delivers every pending action to the model, in submission order.
    ///
    /// Returns the number of delivered actions.
    fn drain_actions(&self) -> usize;

    /// Registers the model that receives actions (weak back-reference).
    fn register_model(&self, model: &Arc<dyn Model>);
}
