//! Diagnostic macros - forwarded to `tracing` when the `tracing` feature is
//! enabled, no-ops otherwise.
//!
//! Call sites use plain format-string syntax so both expansions accept them.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{trace, warn};

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        // Type-checks the format arguments without emitting anything.
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_impl {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use trace;
#[cfg(not(feature = "tracing"))]
pub(crate) use warn_impl as warn;
