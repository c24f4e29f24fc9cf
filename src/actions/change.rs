//! # Property change notification sent from the model towards the views.

use std::sync::Arc;

use crate::actions::Value;

/// New value of a model property, with the previously known value if any.
///
/// - `old` is `None` when the controller had never seen the property, and
///   always `None` for replayed state.
/// - `old` is `Some(Value::None)` when the previous value was an explicit null.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChange {
    /// Programmatic name of the property.
    pub property: Arc<str>,
    /// Previously cached value.
    pub old: Option<Value>,
    /// New value.
    pub new: Value,
}

impl PropertyChange {
    /// Creates a change without a previous value.
    pub fn new(property: impl Into<Arc<str>>, new: impl Into<Value>) -> Self {
        Self {
            property: property.into(),
            old: None,
            new: new.into(),
        }
    }

    /// Attaches the previously known value.
    #[inline]
    pub fn with_old(mut self, old: Option<Value>) -> Self {
        self.old = old;
        self
    }

    #[inline]
    pub fn property(&self) -> &str {
        &self.property
    }
}
