//! Observer - converts object graphs into reactive ones.
//!
//! [`make_reactive`] walks an object's fields in definition order and turns
//! each one into a tracked cell: a hidden backing value paired with its own
//! [`Dep`]. From then on every read collects the evaluating watchers and
//! every write diffs against the current value before notifying. Nested
//! object values are converted first, transitively, so the whole graph is
//! observable.
//!
//! Lists are intentionally not converted: they keep ordinary shared-storage
//! semantics, and mutating one in place notifies nothing.
//!
//! # Example
//!
//! ```ignore
//! use spark_observe::{make_reactive, watch, ReactiveObject, Value};
//!
//! let product = ReactiveObject::from_entries([("price", 100i64)]);
//! make_reactive(&Value::from(product.clone()));
//!
//! let watcher = watch(&product, "price", |new, old| {
//!     println!("price: {old:?} -> {new:?}");
//! });
//!
//! product.set("price", 90i64); // callback fires with (90, 100)
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::dep::Dep;
use crate::logging::trace;
use crate::value::Value;

// =============================================================================
// ReactiveCell - one field's backing value and dependency set
// =============================================================================

/// Hidden storage for one field. The backing value is only reachable through
/// the accessor pair: `get` registers the evaluating watchers, `set` diffs
/// and notifies. Cells start plain and go live when the owning object is
/// observed.
struct ReactiveCell {
    value: RefCell<Value>,
    dep: Dep,
    tracked: Cell<bool>,
}

impl ReactiveCell {
    fn new(value: Value, tracked: bool) -> Self {
        Self {
            value: RefCell::new(value),
            dep: Dep::new(),
            tracked: Cell::new(tracked),
        }
    }

    fn get(&self) -> Value {
        if self.tracked.get() {
            self.dep.depend();
        }
        self.value.borrow().clone()
    }

    fn set(&self, new_value: Value) {
        if !self.tracked.get() {
            *self.value.borrow_mut() = new_value;
            return;
        }
        if self.value.borrow().strict_eq(&new_value) {
            return;
        }
        *self.value.borrow_mut() = new_value;
        // Borrow released above: subscriber callbacks are free to read and
        // write this cell re-entrantly.
        self.dep.notify();
    }
}

// =============================================================================
// ReactiveObject
// =============================================================================

/// Handle to a structured object: an insertion-ordered map from field name
/// to reactive cell. Cloning is shallow - clones alias the same object, and
/// identity (not structure) is what write-diffing compares.
#[derive(Clone, Default)]
pub struct ReactiveObject {
    inner: Rc<ObjectInner>,
}

#[derive(Default)]
struct ObjectInner {
    fields: RefCell<IndexMap<String, Rc<ReactiveCell>>>,
    /// Idempotency marker: set once `make_reactive` has walked this object.
    observed: Cell<bool>,
}

impl ReactiveObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an object from `(name, value)` pairs, in order.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let object = Self::new();
        for (key, value) in entries {
            let key: String = key.into();
            object.set(&key, value);
        }
        object
    }

    /// Read a field, registering the evaluating watchers when the object is
    /// reactive. `None` means the field does not exist.
    pub fn get(&self, key: &str) -> Option<Value> {
        let cell = self.inner.fields.borrow().get(key).cloned();
        cell.map(|cell| cell.get())
    }

    /// Write a field. On a reactive object, a value strictly equal to the
    /// current one is a no-op; otherwise the backing value is replaced and
    /// subscribers are notified synchronously. Writing a new key creates the
    /// field (tracked immediately when the object is already reactive).
    ///
    /// The written value itself is not converted; conversion of resolved
    /// values happens lazily when a watcher path observes them.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        let existing = self.inner.fields.borrow().get(key).cloned();
        match existing {
            Some(cell) => cell.set(value),
            None => {
                let tracked = self.inner.observed.get();
                if tracked {
                    // Late-added fields join the reactive graph immediately.
                    make_reactive(&value);
                }
                let cell = Rc::new(ReactiveCell::new(value, tracked));
                self.inner.fields.borrow_mut().insert(key.to_string(), cell);
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.fields.borrow().contains_key(key)
    }

    /// Field names in definition order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.fields.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.fields.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.fields.borrow().is_empty()
    }

    /// Whether this object has been converted by [`make_reactive`].
    pub fn is_reactive(&self) -> bool {
        self.inner.observed.get()
    }

    /// The dependency set backing `key`, if the field exists. Introspection
    /// surface: subscriber counts, manual subscribe/unsubscribe.
    pub fn field_dep(&self, key: &str) -> Option<Dep> {
        self.inner.fields.borrow().get(key).map(|cell| cell.dep.clone())
    }

    /// Identity comparison: do both handles alias the same object?
    pub fn ptr_eq(&self, other: &ReactiveObject) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ReactiveObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveObject")
            .field("fields", &self.len())
            .field("reactive", &self.is_reactive())
            .finish()
    }
}

// =============================================================================
// Conversion
// =============================================================================

/// Recursively convert `value` into a reactive object graph, in place.
///
/// Primitives and lists pass through untouched; objects already converted
/// are left alone (the hidden marker makes conversion idempotent and breaks
/// reference cycles). Safe to call at any time; watcher path resolution
/// calls it lazily on resolved values.
pub fn make_reactive(value: &Value) {
    match value {
        Value::Object(object) => observe_object(object),
        other => {
            trace!("make_reactive: ignoring {} value", other.type_name());
        }
    }
}

fn observe_object(object: &ReactiveObject) {
    // Marker first: a cycle back to this object must hit the early return.
    if object.inner.observed.replace(true) {
        return;
    }
    let cells: Vec<Rc<ReactiveCell>> = object.inner.fields.borrow().values().cloned().collect();
    for cell in cells {
        // Convert nested objects before the accessors go live.
        let value = cell.value.borrow().clone();
        if let Value::Object(child) = &value {
            observe_object(child);
        }
        cell.tracked.set(true);
    }
}
