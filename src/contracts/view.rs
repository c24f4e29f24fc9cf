//! # View-side contracts.
//!
//! - [`UpdateReceiver`] is implemented by a view that displays model state.
//! - [`InteractiveView`] additionally accepts the controller it sends actions to.
//! - [`ViewerController`] is the controller surface a view is allowed to use.
//!
//! A view never sees the model. It submits actions through its
//! `Arc<dyn ViewerController>` and receives changes through an update channel.

use std::sync::Arc;

use crate::actions::{ActionCommand, PropertyChange};
use crate::channels::UpdateChannel;

/// View that renders property changes.
///
/// When wrapped in a [`HostUpdater`](crate::HostUpdater) this runs on the
/// host loop thread, one change at a time, in report order.
pub trait UpdateReceiver: Send + Sync + 'static {
    fn update_component(&self, change: &PropertyChange);
}

/// View that also emits user actions.
pub trait InteractiveView: UpdateReceiver {
    /// Hands the view the controller it must send its actions to.
    fn register_controller(&self, controller: Arc<dyn ViewerController>);
}

/// Controller operations available to a view.
pub trait ViewerController: Send + Sync {
    /// Buffers `action` for the model and notifies it that something is pending.
    fn submit_action(&self, action: ActionCommand);

    /// Registers an update channel. Returns `false` if it was already registered.
    fn register_update_channel(&self, channel: &Arc<dyn UpdateChannel>) -> bool;

    /// Removes an update channel. Returns `false` if it was not registered.
    fn unregister_update_channel(&self, channel: &Arc<dyn UpdateChannel>) -> bool;

    /// Sends every cached property to `channel`. Returns the number sent.
    fn replay_cached_state_to(&self, channel: &dyn UpdateChannel) -> usize;
}
