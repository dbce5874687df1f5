//! Evaluation stack - ambient record of currently evaluating watchers.
//!
//! While a watcher resolves its path, it sits on this thread-local stack so
//! that every reactive field read during the resolution can register it as a
//! subscriber. Nested evaluations stack up; a field read registers *every*
//! watcher on the stack, not just the innermost, because each enclosing
//! computation is also a current reader of that field.
//!
//! Push/pop is wrapped in a scope guard. The pop runs on every exit path,
//! including unwinding out of a panicking evaluation, so the stack can never
//! go unbalanced.

use std::cell::RefCell;

use crate::watcher::Watcher;

thread_local! {
    static EVAL_STACK: RefCell<Vec<Watcher>> = const { RefCell::new(Vec::new()) };
}

/// Scope guard for one watcher evaluation. Pops the watcher when dropped.
pub(crate) struct EvalGuard(());

impl Drop for EvalGuard {
    fn drop(&mut self) {
        EVAL_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Push `watcher` for the duration of the returned guard's scope.
pub(crate) fn begin_evaluation(watcher: Watcher) -> EvalGuard {
    EVAL_STACK.with(|stack| {
        stack.borrow_mut().push(watcher);
    });
    EvalGuard(())
}

/// Snapshot of the watchers currently evaluating, oldest first.
pub(crate) fn active_watchers() -> Vec<Watcher> {
    EVAL_STACK.with(|stack| stack.borrow().clone())
}

/// Current nesting depth of watcher evaluations.
pub fn evaluation_depth() -> usize {
    EVAL_STACK.with(|stack| stack.borrow().len())
}

/// Clear the stack. Test helper for recovering after a caught panic.
pub fn reset_evaluation_stack() {
    EVAL_STACK.with(|stack| {
        stack.borrow_mut().clear();
    });
}
