#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `dirpath` walks directory trees lazily and filters what it reports with a
//! small predicate language: literal values, globs, regular expressions and
//! callbacks. Each predicate can target files, directories or both, and can
//! decide either what is reported or what is descended into.
//!
//! [`Dirpath`] is the entry point for the local file system. Everything else
//! is re-exported from the `walk`, `filters` and `logging` crates.
//!
//! # Examples
//!
//! ```
//! use dirpath::Dirpath;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::create_dir_all(temp.path().join("target/debug"))?;
//! std::fs::create_dir_all(temp.path().join("src"))?;
//! std::fs::write(temp.path().join("src/main.rs"), b"")?;
//! std::fs::write(temp.path().join("target/debug/main.rs"), b"")?;
//!
//! let sources = Dirpath::new(temp.path())
//!     .iterator()
//!     .files()
//!     .nin_dir("target")?
//!     .pattern("**/*.rs")?;
//!
//! let found: Vec<String> = sources
//!     .iter()
//!     .map(|entry| entry.map(|entry| entry.relative_path().to_owned()))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(found, ["src/main.rs"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # Diagnostics
//!
//! Walk, filter, prune and sort decisions are recorded through
//! [`logging::debug_log!`]. Enable them with [`VerbosityConfig`] and
//! [`init_logging`], or from the `DIRPATH_DEBUG` environment variable with
//! [`VerbosityConfig::from_env`]. With the `tracing` feature the same events
//! are forwarded to `tracing` under `dirpath::*` targets.

use std::path::{Path, PathBuf};

pub use filters::{
    AttrValue, BucketName, CriteriaStore, Haystack, MatchError, MatchMode, Needle, NeedleKind,
    Options, PatternError, RegexFlags, Subject, Verdict,
};
pub use logging::{
    DEBUG_ENV, DebugFlag, DebugLevels, DiagnosticEvent, EVENT_CAPACITY, InfoFlag, InfoLevels,
    VerbosityConfig, capture_events, drain_events,
};
pub use walk::{
    Attribute, BuildError, Child, Comparator, EntryNeedle, FsPath, PathEntity, PathIterator,
    SortOrder, Walk, WalkEntry, WalkError, WalkErrorKind, WalkerConfig,
};

#[cfg(feature = "tracing")]
pub use logging::init_tracing;

/// A directory on the local file system.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dirpath {
    path: PathBuf,
    follow_symlinks: bool,
}

impl Dirpath {
    /// Wraps `path`. Nothing is read until a walk starts.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            follow_symlinks: false,
        }
    }

    /// Descends through directory symlinks during walks.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// The wrapped path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A walk builder rooted at this directory.
    #[must_use]
    pub fn iterator(&self) -> PathIterator<FsPath> {
        PathIterator::new(FsPath::new(&self.path).follow_symlinks(self.follow_symlinks))
    }
}

impl From<PathBuf> for Dirpath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for Dirpath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl AsRef<Path> for Dirpath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Installs `config` as the diagnostic verbosity for the current thread.
///
/// With the `tracing` feature this also installs a global `tracing`
/// subscriber and returns whether it was installed; see `init_tracing`.
/// Events then go to the subscriber only and are no longer buffered for
/// [`drain_events`]. Without the feature events are buffered, up to
/// [`EVENT_CAPACITY`], and the return value is always `false`.
pub fn init_logging(config: VerbosityConfig) -> bool {
    #[cfg(feature = "tracing")]
    {
        init_tracing(config)
    }
    #[cfg(not(feature = "tracing"))]
    {
        logging::init(config);
        false
    }
}
