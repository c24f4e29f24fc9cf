//! # Tagged property value.
//!
//! A single [`Value`] type carries everything that travels between views and
//! the model. Primitive variants (`Bool`, `Number`) are stored inline so that
//! high-rate updates (gauges, meters) do not allocate.
//!
//! ## Equality
//! - Primitive and text variants compare by value.
//! - `Opaque` compares by **identity** (same shared allocation).
//!
//! ## Example
//! ```rust
//! use mvcbridge::Value;
//!
//! assert_eq!(Value::from(36.6), Value::Number(36.6));
//! assert_eq!(Value::from(true).as_bool(), Some(true));
//! assert_eq!(Value::from("auto").as_text(), Some("auto"));
//! assert!(Value::from(None::<bool>).is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Value of a property or the payload of an action.
#[derive(Clone, Default)]
pub enum Value {
    /// Explicit null.
    #[default]
    None,
    /// Boolean flag.
    Bool(bool),
    /// Floating-point number.
    Number(f64),
    /// Shared immutable string.
    Text(Arc<str>),
    /// Arbitrary shared payload; downcast with [`Value::downcast_ref`].
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wraps an arbitrary payload into [`Value::Opaque`].
    pub fn opaque<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Opaque(Arc::new(payload))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the opaque payload as `T` if it holds one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Short name of the variant (for logs).
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Opaque(_) => "opaque",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(&&**s).finish(),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("none"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Opaque(_) => f.write_str("<opaque>"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Arc::from(v))
    }
}

impl From<Arc<str>> for Value {
    fn from(v: Arc<str>) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_equality_is_identity() {
        let a = Value::opaque(vec![1u8, 2, 3]);
        let b = a.clone();
        let c = Value::opaque(vec![1u8, 2, 3]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.downcast_ref::<Vec<u8>>(), Some(&vec![1u8, 2, 3]));
        assert_eq!(a.downcast_ref::<String>(), None);
    }

    #[test]
    fn test_none_is_distinct_from_falsy_values() {
        assert_ne!(Value::None, Value::Bool(false));
        assert_ne!(Value::None, Value::Number(0.0));
        assert_ne!(Value::None, Value::from(""));
    }

    #[test]
    fn test_integer_conversions_are_numbers() {
        assert_eq!(Value::from(10), Value::Number(10.0));
        assert_eq!(Value::from(7u32).as_number(), Some(7.0));
        assert_eq!(Value::from(Some(false)), Value::Bool(false));
    }
}
