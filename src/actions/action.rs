//! # Action envelope sent from a view towards the model.
//!
//! Unlike a [`PropertyChange`](crate::PropertyChange), an action carries no
//! previous value: it is a command that means something by the fact that it
//! was issued (a button press, a slider release, a menu selection).
//!
//! ## Rules
//! - The property name is never empty (checked at construction).
//! - Immutable once built; consumed exactly once by the model on drain.

use std::sync::Arc;

use crate::actions::Value;
use crate::error::ActionError;

/// Command produced by a view and consumed by the model.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionCommand {
    property: Arc<str>,
    value: Value,
}

impl ActionCommand {
    /// Builds a new action.
    ///
    /// # Errors
    /// Returns [`ActionError::EmptyPropertyName`] if `property` is empty.
    ///
    /// # Example
    /// ```
    /// use mvcbridge::{ActionCommand, ActionError, Value};
    ///
    /// let ac = ActionCommand::new("speed", 10).unwrap();
    /// assert_eq!(ac.property(), "speed");
    /// assert_eq!(ac.value(), &Value::Number(10.0));
    ///
    /// assert_eq!(ActionCommand::new("", true), Err(ActionError::EmptyPropertyName));
    /// ```
    pub fn new(property: impl Into<Arc<str>>, value: impl Into<Value>) -> Result<Self, ActionError> {
        let property = property.into();
        if property.is_empty() {
            return Err(ActionError::EmptyPropertyName);
        }
        Ok(Self {
            property,
            value: value.into(),
        })
    }

    /// Programmatic name of the property this action targets.
    #[inline]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Shared handle to the property name.
    #[inline]
    pub(crate) fn shared_property(&self) -> Arc<str> {
        Arc::clone(&self.property)
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Splits the action into its name and value.
    pub fn into_parts(self) -> (Arc<str>, Value) {
        (self.property, self.value)
    }
}
