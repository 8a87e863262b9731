/// Per-criterion options carried by a [`Needle`](crate::Needle).
///
/// The routing flags (`files`, `dirs`, `filename`, `dirname`, `basename`) are
/// consumed by [`CriteriaStore::add`](crate::CriteriaStore::add); the rest
/// travel with the registered criterion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// Attribute to compare instead of the path itself.
    pub attribute: Option<String>,
    /// Negate the raw match result.
    pub inverse: bool,
    /// Consult the criterion when deciding descent rather than reporting.
    pub traversal: bool,
    /// Stop descending into a directory that satisfies the criterion.
    pub finish: bool,
    /// Replacement depth budget for the subtree of a satisfying directory.
    pub depth: Option<i64>,
    /// Route to the `files` bucket.
    pub files: bool,
    /// Route to the `dirs` bucket.
    pub dirs: bool,
    /// Route to `files` and compare the basename.
    pub filename: bool,
    /// Route to `dirs` and compare the basename.
    pub dirname: bool,
    /// Route to `files` and `dirs` and compare the basename.
    pub basename: bool,
    /// Case folding override; globs follow the platform when unset.
    pub case_insensitive: Option<bool>,
    /// Extra flags for regex needles.
    pub regex: RegexFlags,
}

/// Regex flags beyond case folding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RegexFlags {
    /// `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `.` also matches `\n`.
    pub dot_matches_new_line: bool,
    /// Whitespace and `#` comments in the expression are ignored.
    pub ignore_whitespace: bool,
}
