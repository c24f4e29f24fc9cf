//! # Boundaries between views, the controller and the model.
//!
//! ```text
//!  View ──(ViewerController)──► Controller ──(Model)──► Model
//!  View ◄──(UpdateReceiver)──── Controller ◄──(ModelListener)── Model
//! ```
//!
//! The controller implements both [`ViewerController`] and [`ModelListener`].
//! Handing a view only `Arc<dyn ViewerController>` and a model only
//! `Arc<dyn ModelListener>` keeps traffic one-directional: views cannot drain
//! actions or publish state, models cannot submit actions or touch views.

mod model;
mod view;

pub use model::{Model, ModelListener};
pub use view::{InteractiveView, UpdateReceiver, ViewerController};
