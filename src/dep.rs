//! Dep - the per-field dependency set.
//!
//! Every reactive field owns one `Dep`. Reads collect the evaluating
//! watchers into it ([`Dep::depend`]), writes fan out of it
//! ([`Dep::notify`]). A watcher may sit in many deps (one per field its
//! last evaluation read) and a dep may hold many watchers.
//!
//! Subscribers are held weakly: dropping the last handle of a watcher is
//! enough to stop its notifications, and dead entries are pruned on the
//! next notify.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::logging::trace;
use crate::stack;
use crate::watcher::{Watcher, WatcherInner};

/// Subscriber set for one reactive field. Cloning aliases the same set.
#[derive(Clone, Default)]
pub struct Dep {
    inner: Rc<DepInner>,
}

#[derive(Default)]
struct DepInner {
    subs: RefCell<Vec<Weak<WatcherInner>>>,
}

impl Dep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `watcher` to the subscriber list.
    ///
    /// No deduplication happens here - the watcher-side registration
    /// protocol ([`Watcher`]'s per-evaluation dep set) is what prevents a
    /// single read from double-subscribing.
    pub fn subscribe(&self, watcher: &Watcher) {
        self.inner.subs.borrow_mut().push(Rc::downgrade(watcher.inner()));
    }

    /// Remove the first matching subscription; no-op if absent.
    pub fn unsubscribe(&self, watcher: &Watcher) {
        let mut subs = self.inner.subs.borrow_mut();
        let target = Rc::as_ptr(watcher.inner());
        if let Some(index) = subs.iter().position(|sub| sub.as_ptr() == target) {
            subs.remove(index);
        }
    }

    /// Register every watcher currently evaluating, oldest first.
    ///
    /// A field read during nested evaluation counts as a read by every
    /// enclosing computation, so the whole stack registers, not just the
    /// innermost entry.
    pub fn depend(&self) {
        for watcher in stack::active_watchers() {
            watcher.add_dep(self);
        }
    }

    /// Invoke every live subscriber's update, in subscription order.
    ///
    /// The list is snapshotted up front so callbacks that subscribe or
    /// unsubscribe (or write reactive fields themselves, re-entering this
    /// path) cannot corrupt the iteration. Callbacks run synchronously on
    /// the calling thread; a panicking callback propagates.
    pub fn notify(&self) {
        let subs: Vec<Weak<WatcherInner>> = {
            let mut subs = self.inner.subs.borrow_mut();
            subs.retain(|sub| sub.strong_count() > 0);
            subs.clone()
        };
        trace!("notify: fanning out to {} subscriber(s)", subs.len());
        for sub in subs {
            if let Some(inner) = sub.upgrade() {
                Watcher::from_inner(inner).update();
            }
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subs
            .borrow()
            .iter()
            .filter(|sub| sub.strong_count() > 0)
            .count()
    }

    pub(crate) fn ptr_eq(&self, other: &Dep) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
