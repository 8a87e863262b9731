#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the verbosity flag system used by the directory walker
//! and the filter engine. Diagnostics are grouped into categories
//! ([`InfoFlag`], [`DebugFlag`]), each with its own level, and are recorded
//! only when the configured level for that category is high enough.
//!
//! # Design
//!
//! The active [`VerbosityConfig`] lives in thread-local storage so the walker
//! can consult it without threading a logger through every call. Messages that
//! pass the gate are collected as [`DiagnosticEvent`]s which tests (and
//! embedding applications) drain with [`drain_events`]. The buffer holds at
//! most [`EVENT_CAPACITY`] events and can be switched off with
//! [`capture_events`]. With the `tracing` feature enabled each event is also
//! forwarded to `tracing` under a `dirpath::<flag>` target, and
//! [`init_tracing`] installs a formatting subscriber whose filter mirrors the
//! configuration and stops buffering on the calling thread.
//!
//! # Invariants
//!
//! - A flag at level `0` never records anything.
//! - [`debug_log!`] evaluates its format arguments only after the level check
//!   succeeds.
//! - Events are drained in emission order.
//! - At most [`EVENT_CAPACITY`] events are buffered per thread.
//!
//! # Examples
//!
//! ```
//! use logging::{debug_log, drain_events, init, VerbosityConfig};
//!
//! let mut config = VerbosityConfig::default();
//! config.apply_debug_flag("prune2").unwrap();
//! init(config);
//!
//! debug_log!(Prune, 1, "pruned {}", "boo/baz");
//! debug_log!(Prune, 3, "too detailed");
//!
//! let events = drain_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].message(), "pruned boo/baz");
//! ```

mod config;
mod levels;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{DEBUG_ENV, VerbosityConfig};
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, EVENT_CAPACITY, apply_debug_flag, apply_info_flag, capture_events,
    capturing_events, current, debug_gte, drain_events, emit_debug, emit_info, info_gte, init,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{env_filter, filter_directives, init_tracing};

/// Record a debug diagnostic when the named [`DebugFlag`] is at or above `level`.
///
/// ```
/// use logging::{debug_log, drain_events, init, VerbosityConfig};
///
/// init(VerbosityConfig::from_verbose_level(2));
/// debug_log!(Walk, 1, "descending into {}", "bar");
/// assert_eq!(drain_events().len(), 1);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::debug_gte($crate::DebugFlag::$flag, $level) {
            $crate::emit_debug($crate::DebugFlag::$flag, $level, format!($($arg)+));
        }
    };
}

/// Record an info diagnostic when the named [`InfoFlag`] is at or above `level`.
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::info_gte($crate::InfoFlag::$flag, $level) {
            $crate::emit_info($crate::InfoFlag::$flag, $level, format!($($arg)+));
        }
    };
}
