//! Dynamic value tree for reactive object graphs.
//!
//! `Value` is the explicit tagged distinction between primitive values and
//! structured (observable) values. Only [`Value::Object`] participates in
//! dependency tracking; everything else is payload.
//!
//! Equality between values follows host-number semantics rather than
//! structural comparison: primitives compare by value (`NaN` is never equal
//! to itself, `0.0` equals `-0.0`), lists and objects compare by reference
//! identity. This is the equality the write path diffs with, so replacing a
//! field with a structurally equal but distinct object still notifies.
//!
//! # Example
//!
//! ```ignore
//! use spark_observe::Value;
//!
//! let price = Value::from(100.0);
//! let label = Value::from("base price");
//! assert!(price.strict_eq(&Value::from(100.0)));
//! assert!(!price.strict_eq(&label));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::observer::ReactiveObject;

/// Shared list storage. Lists deliberately pass through the reactive layer
/// with ordinary semantics: index writes and in-place mutation are not
/// intercepted and notify nothing.
pub type ValueList = Rc<RefCell<Vec<Value>>>;

/// A dynamically typed value stored in a reactive object graph.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent/empty value. Path resolution treats it as a dead end.
    #[default]
    Null,
    Bool(bool),
    /// All numbers are `f64`, so equality follows float semantics.
    Number(f64),
    Str(String),
    /// Plain list, shared by handle. Never reactive.
    List(ValueList),
    /// Structured object; the only variant the observer walks.
    Object(ReactiveObject),
}

impl Value {
    /// Build a list value from items.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Strict equality: by value for primitives, by identity for lists and
    /// objects, never across variants. This is the diff the write path uses
    /// to decide whether to notify.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            // NaN != NaN, 0.0 == -0.0
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ValueList> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ReactiveObject> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Variant name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<ReactiveObject> for Value {
    fn from(object: ReactiveObject) -> Self {
        Value::Object(object)
    }
}

// Shallow on purpose: lists and objects can hold reference cycles.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => write!(f, "List(len={})", items.borrow().len()),
            Value::Object(object) => write!(f, "Object(fields={})", object.len()),
        }
    }
}
