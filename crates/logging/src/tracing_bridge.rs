//! crates/logging/src/tracing_bridge.rs
//! Bridge between the verbosity flags and a `tracing` subscriber.
//!
//! Events recorded through [`emit_debug`](crate::emit_debug) are forwarded to
//! `tracing` under one target per [`DebugFlag`]. This module turns a
//! [`VerbosityConfig`] into the matching `EnvFilter` directives and installs a
//! formatting subscriber for them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! init_tracing(config);
//!
//! tracing::debug!(target: "dirpath::walk", "entering directory");
//! ```

use super::config::VerbosityConfig;
use super::levels::DebugFlag;
use tracing_subscriber::EnvFilter;

/// Map a flag level to the `tracing` level name used in filter directives.
const fn directive_level(level: u8) -> &'static str {
    match level {
        0 => "off",
        1 | 2 => "debug",
        _ => "trace",
    }
}

/// Render `EnvFilter` directives for every flag in `config`.
///
/// The info flags share the bare `dirpath` target and are enabled at `info`
/// whenever any of them is set.
#[must_use]
pub fn filter_directives(config: &VerbosityConfig) -> String {
    let mut directives = Vec::with_capacity(DebugFlag::ALL.len() + 1);

    let info = if config.info.walk.max(config.info.skip) > 0 {
        "info"
    } else {
        "warn"
    };
    directives.push(format!("dirpath={info}"));

    for flag in DebugFlag::ALL {
        let level = config.debug.get(flag);
        directives.push(format!("{}={}", flag.target(), directive_level(level)));
    }

    directives.join(",")
}

/// Build the `EnvFilter` for `config`, letting `RUST_LOG` take precedence.
#[must_use]
pub fn env_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(config)))
}

/// Initialize tracing for the given verbosity configuration.
///
/// The thread-local configuration is updated as well so the `debug_log!`
/// gate agrees with the subscriber, and event buffering is switched off on
/// this thread since the subscriber receives every event. Returns `false`
/// when a global subscriber was already installed; the thread-local state is
/// updated either way.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    let filter = env_filter(&config);
    super::thread_local::init(config);
    super::thread_local::capture_events(false);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
