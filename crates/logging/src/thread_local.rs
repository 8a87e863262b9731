//! crates/logging/src/thread_local.rs
//! Thread-local storage for verbosity configuration and event collection.

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Most events buffered between drains. The oldest event is dropped first.
pub const EVENT_CAPACITY: usize = 1024;

thread_local! {
    static VERBOSITY: RefCell<VerbosityConfig> = RefCell::new(VerbosityConfig::default());
    static CAPTURE: Cell<bool> = const { Cell::new(true) };
    #[allow(clippy::missing_const_for_thread_local)]
    static EVENTS: RefCell<VecDeque<DiagnosticEvent>> = RefCell::new(VecDeque::new());
}

/// Diagnostic event collected during execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Info-level diagnostic event.
    Info {
        /// The info flag category.
        flag: InfoFlag,
        /// The verbosity level.
        level: u8,
        /// The diagnostic message.
        message: String,
    },
    /// Debug-level diagnostic event.
    Debug {
        /// The debug flag category.
        flag: DebugFlag,
        /// The verbosity level.
        level: u8,
        /// The diagnostic message.
        message: String,
    },
}

impl DiagnosticEvent {
    /// Returns the message carried by the event.
    pub fn message(&self) -> &str {
        match self {
            Self::Info { message, .. } | Self::Debug { message, .. } => message,
        }
    }
}

/// Initialize verbosity configuration for the current thread.
pub fn init(config: VerbosityConfig) {
    VERBOSITY.with(|v| {
        *v.borrow_mut() = config;
    });
}

/// Returns a copy of the configuration active on the current thread.
pub fn current() -> VerbosityConfig {
    VERBOSITY.with(|v| v.borrow().clone())
}

/// Turn event buffering on or off for the current thread.
///
/// Buffering is on by default. Turning it off discards anything buffered;
/// `tracing` forwarding is unaffected.
pub fn capture_events(enabled: bool) {
    CAPTURE.with(|c| c.set(enabled));
    if !enabled {
        EVENTS.with(|e| e.borrow_mut().clear());
    }
}

/// Whether emitted events are buffered for [`drain_events`].
pub fn capturing_events() -> bool {
    CAPTURE.with(Cell::get)
}

fn record(event: DiagnosticEvent) {
    if !capturing_events() {
        return;
    }
    EVENTS.with(|e| {
        let mut events = e.borrow_mut();
        if events.len() >= EVENT_CAPACITY {
            events.pop_front();
        }
        events.push_back(event);
    });
}

/// Check if the info flag is at or above the specified level.
pub fn info_gte(flag: InfoFlag, level: u8) -> bool {
    VERBOSITY.with(|v| v.borrow().info.get(flag) >= level)
}

/// Check if the debug flag is at or above the specified level.
pub fn debug_gte(flag: DebugFlag, level: u8) -> bool {
    VERBOSITY.with(|v| v.borrow().debug.get(flag) >= level)
}

/// Emit an info diagnostic event.
pub fn emit_info(flag: InfoFlag, level: u8, message: String) {
    #[cfg(feature = "tracing")]
    tracing::info!(target: "dirpath", flag = flag.name(), level, "{message}");

    record(DiagnosticEvent::Info {
        flag,
        level,
        message,
    });
}

/// Emit a debug diagnostic event.
///
/// With the `tracing` feature the event is also forwarded to the active
/// subscriber under the flag's `dirpath::<flag>` target.
pub fn emit_debug(flag: DebugFlag, level: u8, message: String) {
    #[cfg(feature = "tracing")]
    forward_debug(flag, level, &message);

    record(DiagnosticEvent::Debug {
        flag,
        level,
        message,
    });
}

// Targets must be literals for the tracing macros.
#[cfg(feature = "tracing")]
fn forward_debug(flag: DebugFlag, level: u8, message: &str) {
    match flag {
        DebugFlag::Walk => tracing::debug!(target: "dirpath::walk", level, "{message}"),
        DebugFlag::Filter => tracing::debug!(target: "dirpath::filter", level, "{message}"),
        DebugFlag::Prune => tracing::debug!(target: "dirpath::prune", level, "{message}"),
        DebugFlag::Sort => tracing::debug!(target: "dirpath::sort", level, "{message}"),
    }
}

/// Drain all collected events, clearing the internal buffer.
pub fn drain_events() -> Vec<DiagnosticEvent> {
    EVENTS.with(|e| e.borrow_mut().drain(..).collect())
}

/// Apply an info flag token to the current configuration.
pub fn apply_info_flag(token: &str) -> Result<(), String> {
    VERBOSITY.with(|v| v.borrow_mut().apply_info_flag(token))
}

/// Apply a debug flag token to the current configuration.
pub fn apply_debug_flag(token: &str) -> Result<(), String> {
    VERBOSITY.with(|v| v.borrow_mut().apply_debug_flag(token))
}
