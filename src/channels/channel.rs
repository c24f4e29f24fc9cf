//! # Update channel trait
//!
//! `UpdateChannel` is the extension point through which the controller pushes
//! property changes towards a view. The controller calls [`deliver`](UpdateChannel::deliver)
//! on the **model** thread; an implementation decides where the view code
//! actually runs (see [`HostUpdater`](crate::HostUpdater)).
//!
//! ## Contract
//! - `deliver` should return quickly; it must not wait for the view.
//! - Changes delivered to one channel must reach its view in delivery order.
//! - A panic inside `deliver` is contained by the controller; other channels
//!   still receive the change.

use crate::actions::PropertyChange;

/// Receiver of property changes on behalf of one view.
pub trait UpdateChannel: Send + Sync + 'static {
    /// Hands one change to the view side.
    fn deliver(&self, change: PropertyChange);

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
