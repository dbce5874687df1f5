//! # spark-observe
//!
//! Fine-grained reactive dependency tracking for Rust.
//!
//! A small synchronous engine in three layers: reads of observed fields
//! record who is asking, writes notify exactly the computations that asked,
//! and each computation re-reads its path and reports `(new, old)` to its
//! callback.
//!
//! ## Architecture
//!
//! ```text
//! ReactiveObject::set → Dep::notify → Watcher::update → re-resolve path → callback(new, old)
//! ```
//!
//! - Every field of an observed object owns a [`Dep`], its subscriber set.
//! - While a [`Watcher`] evaluates, it sits on a thread-local evaluation
//!   stack; every field read during the evaluation registers it.
//! - Writes diff against the current value (strict equality: by value for
//!   primitives, by identity for lists and objects) and notify
//!   synchronously on change. Subscription sets are diffed after each
//!   re-evaluation, so watchers never accumulate stale entries.
//!
//! Everything runs on the calling thread with no scheduler and no
//! batching; a write returns only after every affected callback ran.
//!
//! ## Example
//!
//! ```ignore
//! use spark_observe::{make_reactive, watch, ReactiveObject, Value};
//!
//! let product = ReactiveObject::from_entries([("price", 100i64), ("stock", 5i64)]);
//! make_reactive(&Value::from(product.clone()));
//!
//! let watcher = watch(&product, "price", |new, old| {
//!     println!("price changed: {old:?} -> {new:?}");
//! });
//!
//! product.set("price", 90i64); // prints: price changed: 100 -> 90
//! product.set("price", 90i64); // equal write: nothing happens
//! ```
//!
//! ## Modules
//!
//! - [`value`] - Dynamic value tree (`Value`: primitives, lists, objects)
//! - [`observer`] - Converts object graphs into reactive ones
//! - [`dep`] - Per-field dependency sets
//! - [`stack`] - Thread-local stack of evaluating watchers
//! - [`path`] - Validated, pre-parsed dotted field paths
//! - [`watcher`] - Path computations with change callbacks

pub mod dep;
mod logging;
pub mod observer;
pub mod path;
pub mod stack;
pub mod value;
pub mod watcher;

// Re-export commonly used items
pub use dep::Dep;
pub use observer::{make_reactive, ReactiveObject};
pub use path::{FieldPath, PathError};
pub use stack::{evaluation_depth, reset_evaluation_stack};
pub use value::{Value, ValueList};
pub use watcher::{watch, ChangeCallback, Watcher};
