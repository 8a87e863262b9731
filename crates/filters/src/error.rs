use thiserror::Error;

/// Error produced when a glob or regex needle cannot be compiled.
///
/// Raised at registration time, never during a walk.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The glob failed to compile.
    #[error("failed to compile glob pattern '{pattern}': {source}")]
    Glob {
        /// The offending glob.
        pattern: String,
        /// Underlying globset error.
        #[source]
        source: globset::Error,
    },
    /// The regular expression failed to compile.
    #[error("failed to compile regular expression '{pattern}': {source}")]
    Regex {
        /// The offending expression.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    /// Returns the offending pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Glob { pattern, .. } | Self::Regex { pattern, .. } => pattern,
        }
    }
}

/// Error produced while evaluating criteria against a subject.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MatchError {
    /// A criterion names an attribute the subject cannot resolve.
    #[error("unknown attribute '{name}'")]
    UnknownAttribute {
        /// The attribute name as registered.
        name: String,
    },
}
