use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use filters::{MatchError, PatternError};
use thiserror::Error;

/// Error returned when a walk or a positional access fails.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub(crate) const fn new(kind: WalkErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) const fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(WalkErrorKind::ReadDir { path, source })
    }

    pub(crate) const fn evaluate(path: PathBuf, source: MatchError) -> Self {
        Self::new(WalkErrorKind::Evaluate { path, source })
    }

    pub(crate) const fn index_out_of_range(index: isize, len: usize) -> Self {
        Self::new(WalkErrorKind::IndexOutOfRange { index, len })
    }

    pub(crate) const fn invalid_slice() -> Self {
        Self::new(WalkErrorKind::InvalidSlice)
    }

    /// Returns the specific failure.
    #[must_use]
    pub const fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }

    /// Returns the filesystem path associated with the error, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::{FsPath, PathIterator};
    ///
    /// let walker = PathIterator::new(FsPath::new("./definitely_missing_root"));
    /// let error = walker.iter().next().unwrap().unwrap_err();
    /// assert!(error.path().unwrap().ends_with("definitely_missing_root"));
    /// ```
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.kind.path()
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WalkErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "failed to read directory '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::Evaluate { path, source } => {
                write!(
                    f,
                    "failed to evaluate criteria for '{}': {}",
                    path.display(),
                    source
                )
            }
            WalkErrorKind::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} entries")
            }
            WalkErrorKind::InvalidSlice => f.write_str("slice step cannot be zero"),
        }
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            WalkErrorKind::ReadDir { source, .. } => Some(source),
            WalkErrorKind::Evaluate { source, .. } => Some(source),
            WalkErrorKind::IndexOutOfRange { .. } | WalkErrorKind::InvalidSlice => None,
        }
    }
}

/// Classification of walk failures.
#[derive(Debug)]
pub enum WalkErrorKind {
    /// Failed to enumerate the children of a directory.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// A criterion could not be evaluated against an entry.
    Evaluate {
        /// Entry being evaluated.
        path: PathBuf,
        /// Underlying evaluation error.
        source: MatchError,
    },
    /// Positional access past the end of the walk.
    IndexOutOfRange {
        /// Requested index, possibly negative.
        index: isize,
        /// Number of entries the walk produced.
        len: usize,
    },
    /// A slice was requested with a step of zero.
    InvalidSlice,
}

impl WalkErrorKind {
    /// Returns the filesystem path tied to the failure, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::ReadDir { path, .. } | Self::Evaluate { path, .. } => Some(path),
            Self::IndexOutOfRange { .. } | Self::InvalidSlice => None,
        }
    }
}

/// Error returned by builder methods that register criteria.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The needle's glob or regex failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// The attribute name is not in the registry.
    #[error("unknown attribute '{name}'")]
    UnknownAttribute {
        /// The rejected name.
        name: String,
    },
}
