//! Watcher - a named computation over a dotted field path.
//!
//! A watcher binds a target object, a parsed path expression, and a change
//! callback. Construction runs one forced evaluation: the watcher pushes
//! itself onto the evaluation stack, resolves the path (every reactive
//! field read along the way registers it as a subscriber), pops off, and
//! stores the result. When any subscribed field is written, the watcher
//! re-evaluates and invokes the callback with `(new, old)`.
//!
//! Because every evaluation re-registers from scratch, the dependency set
//! follows the path through whatever objects it currently resolves. The
//! sets are diffed after each evaluation and stale subscriptions are
//! dropped, so a watcher only ever sits in the deps its latest evaluation
//! actually read.
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
//!     println!("{old:?} -> {new:?}");
//! });
//!
//! product.set("price", 90i64);
//! assert_eq!(watcher.value().unwrap().as_number(), Some(90.0));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dep::Dep;
use crate::logging::warn;
use crate::observer::ReactiveObject;
use crate::path::FieldPath;
use crate::stack;
use crate::value::Value;

/// Change callback: `(new_value, old_value)`. `None` is the "no value"
/// result of a broken or rejected path.
pub type ChangeCallback = Box<dyn Fn(Option<&Value>, Option<&Value>)>;

/// Begin observing `expression` off `target`.
///
/// The returned handle exposes the current tracked value and an explicit
/// re-evaluate operation. A path expression that fails validation degrades
/// to a watcher that always resolves to `None` - observation problems are
/// soft, never errors.
pub fn watch(
    target: &ReactiveObject,
    expression: &str,
    callback: impl Fn(Option<&Value>, Option<&Value>) + 'static,
) -> Watcher {
    Watcher::new(target, expression, Box::new(callback))
}

/// Handle to a watcher. Cloning shares the same computation; dropping the
/// last handle detaches it from every dependency.
#[derive(Clone)]
pub struct Watcher {
    inner: Rc<WatcherInner>,
}

pub(crate) struct WatcherInner {
    target: ReactiveObject,
    /// `None` when the expression was rejected at construction.
    path: Option<FieldPath>,
    callback: ChangeCallback,
    value: RefCell<Option<Value>>,
    /// Subscriptions held over from the previous evaluation.
    deps: RefCell<Vec<Dep>>,
    /// Subscriptions collected by the evaluation in progress.
    new_deps: RefCell<Vec<Dep>>,
    stopped: Cell<bool>,
}

impl Watcher {
    pub fn new(target: &ReactiveObject, expression: &str, callback: ChangeCallback) -> Watcher {
        let path = match FieldPath::parse(expression) {
            Ok(path) => Some(path),
            Err(error) => {
                warn!("watch: rejected path expression: {error}");
                None
            }
        };
        let watcher = Watcher {
            inner: Rc::new(WatcherInner {
                target: target.clone(),
                path,
                callback,
                value: RefCell::new(None),
                deps: RefCell::new(Vec::new()),
                new_deps: RefCell::new(Vec::new()),
                stopped: Cell::new(false),
            }),
        };
        // First evaluation populates the subscription set.
        watcher.run();
        watcher
    }

    /// The value from the most recent evaluation.
    pub fn value(&self) -> Option<Value> {
        self.inner.value.borrow().clone()
    }

    /// The parsed path, or `None` when the expression was rejected.
    pub fn path(&self) -> Option<&FieldPath> {
        self.inner.path.as_ref()
    }

    /// Re-evaluate now, refreshing subscriptions, and return the value.
    pub fn evaluate(&self) -> Option<Value> {
        self.run()
    }

    /// Detach from every dependency. The callback will not fire again; the
    /// stored value stays at its last computed state.
    pub fn stop(&self) {
        if self.inner.stopped.replace(true) {
            return;
        }
        let deps: Vec<Dep> = self.inner.deps.borrow_mut().drain(..).collect();
        for dep in deps {
            dep.unsubscribe(self);
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.get()
    }

    /// Identity comparison: do both handles share the same computation?
    pub fn ptr_eq(&self, other: &Watcher) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// One evaluation: resolve the path with self on the evaluation stack,
    /// then swap the subscription sets and store the result.
    fn run(&self) -> Option<Value> {
        if self.inner.stopped.get() {
            return self.value();
        }
        let resolved = {
            // Guard scope: the pop happens on every exit path.
            let _guard = stack::begin_evaluation(self.clone());
            self.inner
                .path
                .as_ref()
                .and_then(|path| path.resolve(&self.inner.target))
        };
        self.cleanup_deps();
        *self.inner.value.borrow_mut() = resolved.clone();
        resolved
    }

    /// Invalidation entry point, called by a subscribed [`Dep`]. Saves the
    /// old value, re-evaluates, then reports `(new, old)` - exactly once
    /// per notification, even when the two compare equal.
    pub(crate) fn update(&self) {
        if self.inner.stopped.get() {
            return;
        }
        let old = self.inner.value.borrow().clone();
        let new = self.run();
        // No borrow is held here: the callback may freely read and write
        // reactive state, including fields this watcher depends on.
        (self.inner.callback)(new.as_ref(), old.as_ref());
    }

    /// Registration protocol, called by [`Dep::depend`] for every watcher
    /// on the evaluation stack. A dep registers at most once per
    /// evaluation, and subscribes only if the previous evaluation was not
    /// already subscribed.
    pub(crate) fn add_dep(&self, dep: &Dep) {
        if self.inner.new_deps.borrow().iter().any(|d| d.ptr_eq(dep)) {
            return;
        }
        self.inner.new_deps.borrow_mut().push(dep.clone());
        let already_subscribed = self.inner.deps.borrow().iter().any(|d| d.ptr_eq(dep));
        if !already_subscribed {
            dep.subscribe(self);
        }
    }

    /// Drop subscriptions the latest evaluation did not re-register, then
    /// promote the new set.
    fn cleanup_deps(&self) {
        let new_deps = std::mem::take(&mut *self.inner.new_deps.borrow_mut());
        let stale: Vec<Dep> = self
            .inner
            .deps
            .borrow()
            .iter()
            .filter(|old| !new_deps.iter().any(|new| new.ptr_eq(old)))
            .cloned()
            .collect();
        for dep in stale {
            dep.unsubscribe(self);
        }
        *self.inner.deps.borrow_mut() = new_deps;
    }

    pub(crate) fn inner(&self) -> &Rc<WatcherInner> {
        &self.inner
    }

    pub(crate) fn from_inner(inner: Rc<WatcherInner>) -> Watcher {
        Watcher { inner }
    }
}
