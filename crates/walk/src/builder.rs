use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use filters::{CriteriaStore, Haystack, Needle, NeedleKind, PatternError};
use logging::debug_log;

use crate::attribute::Attribute;
use crate::config::{SortOrder, WalkerConfig};
use crate::entity::PathEntity;
use crate::entry::WalkEntry;
use crate::error::BuildError;
use crate::walker::Walk;

/// Needle type accepted by a [`PathIterator`] over `P`.
pub type EntryNeedle<P> = Needle<WalkEntry<P>>;

/// Fluent builder holding the root, the criteria and the walk configuration.
///
/// Every method consumes and returns the builder. Methods that register a
/// criterion return `Result` because globs and regular expressions are
/// compiled on the spot. Iterating borrows the builder, so the same instance
/// can be walked any number of times and each pass starts from scratch.
///
/// # Examples
///
/// ```
/// use walk::{FsPath, PathIterator};
///
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// std::fs::create_dir(temp.path().join("src"))?;
/// std::fs::write(temp.path().join("src/lib.rs"), b"")?;
/// std::fs::write(temp.path().join("README.md"), b"")?;
///
/// let walker = PathIterator::new(FsPath::new(temp.path()))
///     .files()
///     .eq("ext", "rs")?;
/// let found: Vec<String> = walker
///     .iter()
///     .map(|entry| entry.map(|entry| entry.relative_path().to_owned()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(found, ["src/lib.rs"]);
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
pub struct PathIterator<P: PathEntity> {
    root: P,
    store: CriteriaStore<WalkEntry<P>>,
    config: WalkerConfig<P>,
}

impl<P: PathEntity> PathIterator<P> {
    /// Creates a builder that walks `root` without depth limit or criteria.
    #[must_use]
    pub fn new(root: P) -> Self {
        Self {
            root,
            store: CriteriaStore::new(),
            config: WalkerConfig::default(),
        }
    }

    /// The walk root.
    #[must_use]
    pub const fn root(&self) -> &P {
        &self.root
    }

    /// Registered criteria.
    #[must_use]
    pub const fn criteria(&self) -> &CriteriaStore<WalkEntry<P>> {
        &self.store
    }

    /// Current walk configuration.
    #[must_use]
    pub const fn config(&self) -> &WalkerConfig<P> {
        &self.config
    }

    /// Starts a new pass.
    #[must_use]
    pub fn iter(&self) -> Walk<'_, P> {
        Walk::new(self.root.clone(), &self.store, &self.config)
    }

    /// Returns an independent builder with the same root, criteria and
    /// configuration. Callbacks are shared, never duplicated.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // ====================================================================
    // Walk configuration
    // ====================================================================

    /// Limits descent to `depth` levels below the root; negative is unbounded.
    #[must_use]
    pub const fn depth(mut self, depth: i64) -> Self {
        self.config.depth = depth;
        self
    }

    /// `true` walks the whole tree, `false` only the root's children.
    #[must_use]
    pub const fn recursive(self, recursive: bool) -> Self {
        self.depth(if recursive { -1 } else { 1 })
    }

    /// Moves the output balance towards files (`true`) or directories.
    ///
    /// The balances are counters, so `.files().dirs()` cancels out and both
    /// kinds are reported again.
    #[must_use]
    pub const fn include_files(mut self, include: bool) -> Self {
        self.config.shift_files(include);
        self
    }

    /// Moves the output balance towards directories (`true`) or files.
    #[must_use]
    pub const fn include_dirs(mut self, include: bool) -> Self {
        self.config.shift_files(!include);
        self
    }

    /// Shorthand for `include_files(true)`.
    #[must_use]
    pub const fn files(self) -> Self {
        self.include_files(true)
    }

    /// Shorthand for `include_dirs(true)`.
    #[must_use]
    pub const fn dirs(self) -> Self {
        self.include_dirs(true)
    }

    /// Skips directories that cannot be read instead of ending the walk.
    #[must_use]
    pub const fn ignore_errors(mut self, ignore: bool) -> Self {
        self.config.ignore_errors = ignore;
        self
    }

    /// Orders the output by path. The pass buffers everything first.
    #[must_use]
    pub fn sort(mut self) -> Self {
        self.config.sort = Some(SortOrder::Natural);
        self
    }

    /// Orders the output with `compare`. The pass buffers everything first.
    #[must_use]
    pub fn sort_by<F>(mut self, compare: F) -> Self
    where
        F: Fn(&WalkEntry<P>, &WalkEntry<P>) -> Ordering + Send + Sync + 'static,
    {
        self.config.sort = Some(SortOrder::By(Arc::new(compare)));
        self
    }

    /// Reverses the output, after sorting if a sort is configured.
    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    // ====================================================================
    // Criteria
    // ====================================================================

    /// Registers `needle` as-is, routed by its own options.
    ///
    /// An attribute set on the needle is not checked here; an unknown name
    /// fails the first evaluation instead.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the needle's glob or regex is invalid.
    pub fn add(mut self, needle: EntryNeedle<P>) -> Result<Self, PatternError> {
        let buckets = self.store.add(needle)?;
        debug_log!(Filter, 2, "criterion routed to {:?}", buckets);
        Ok(self)
    }

    fn add_kind(
        self,
        needle: impl Into<EntryNeedle<P>>,
        kind: NeedleKind,
        inverse: bool,
    ) -> Result<Self, PatternError> {
        let needle = needle.into().into_kind(kind);
        let inverse = needle.options().inverse != inverse;
        self.add(needle.inverted(inverse))
    }

    /// Reports entries equal to `needle`.
    pub fn value(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Value, false)
    }

    /// Same as [`value`](Self::value).
    pub fn eq_value(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Value, false)
    }

    /// Reports entries not equal to `needle`.
    pub fn ne_value(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Value, true)
    }

    /// Reports entries matching the glob.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Glob`] for an invalid glob.
    pub fn pattern(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Pattern, false)
    }

    /// Same as [`pattern`](Self::pattern).
    pub fn eq_pattern(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Pattern, false)
    }

    /// Reports entries not matching the glob.
    pub fn ne_pattern(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Pattern, true)
    }

    /// Reports entries whose full path contains a match of the expression.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Regex`] for an invalid expression.
    pub fn regex(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Regex, false)
    }

    /// Same as [`regex`](Self::regex).
    pub fn eq_regex(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Regex, false)
    }

    /// Reports entries whose full path contains no match of the expression.
    pub fn ne_regex(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Regex, true)
    }

    /// Reports entries the predicate accepts.
    ///
    /// Use [`callback_needle`](Self::callback_needle) to attach options such
    /// as `finish`.
    pub fn callback<F>(self, predicate: F) -> Result<Self, PatternError>
    where
        F: Fn(&Haystack<'_, WalkEntry<P>>) -> bool + Send + Sync + 'static,
    {
        self.add(Needle::callback(predicate))
    }

    /// Same as [`callback`](Self::callback).
    pub fn eq_callback<F>(self, predicate: F) -> Result<Self, PatternError>
    where
        F: Fn(&Haystack<'_, WalkEntry<P>>) -> bool + Send + Sync + 'static,
    {
        self.add(Needle::callback(predicate))
    }

    /// Reports entries the predicate rejects.
    pub fn ne_callback<F>(self, predicate: F) -> Result<Self, PatternError>
    where
        F: Fn(&Haystack<'_, WalkEntry<P>>) -> bool + Send + Sync + 'static,
    {
        self.add(Needle::callback(predicate).inverse())
    }

    /// Reports entries accepted by a configured callback needle.
    ///
    /// ```
    /// use walk::{EntryNeedle, FsPath, Needle, PathIterator};
    ///
    /// let marked: EntryNeedle<FsPath> =
    ///     Needle::callback(|haystack| haystack.text().ends_with("vendor"));
    /// let walker = PathIterator::new(FsPath::new("."))
    ///     .dirs()
    ///     .callback_needle(marked.finish())?;
    /// # let _ = walker;
    /// # Ok::<(), walk::PatternError>(())
    /// ```
    pub fn callback_needle(self, needle: EntryNeedle<P>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Callback, false)
    }

    /// Same as [`callback_needle`](Self::callback_needle).
    pub fn eq_callback_needle(self, needle: EntryNeedle<P>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Callback, false)
    }

    /// Reports entries a configured callback needle rejects.
    pub fn ne_callback_needle(self, needle: EntryNeedle<P>) -> Result<Self, PatternError> {
        self.add_kind(needle, NeedleKind::Callback, true)
    }

    /// Reports directories matching `needle`.
    pub fn eq_dir(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add(needle.into().dirs())
    }

    /// Reports directories not matching `needle`.
    pub fn ne_dir(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add(needle.into().dirs().inverse())
    }

    /// Reports files matching `needle`.
    pub fn eq_file(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add(needle.into().files())
    }

    /// Reports files not matching `needle`.
    pub fn ne_file(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add(needle.into().files().inverse())
    }

    /// Descends only into directories matching `needle`.
    pub fn in_dir(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add(needle.into().dirs().traversal())
    }

    /// Descends only into directories not matching `needle`.
    pub fn nin_dir(self, needle: impl Into<EntryNeedle<P>>) -> Result<Self, PatternError> {
        self.add(needle.into().dirs().traversal().inverse())
    }

    // ====================================================================
    // Attribute dispatch
    // ====================================================================

    fn add_attribute(self, name: &str, needle: EntryNeedle<P>) -> Result<Self, BuildError> {
        let attribute = Attribute::from_name(name).ok_or_else(|| BuildError::UnknownAttribute {
            name: name.to_owned(),
        })?;
        self.add(needle.attribute(attribute.name()))
            .map_err(BuildError::from)
    }

    /// Reports entries whose attribute `name` matches `needle`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnknownAttribute`] when `name` is not in the
    /// [`Attribute`] registry, or [`BuildError::Pattern`] for a bad needle.
    pub fn eq(self, name: &str, needle: impl Into<EntryNeedle<P>>) -> Result<Self, BuildError> {
        self.add_attribute(name, needle.into())
    }

    /// Reports entries whose attribute `name` does not match `needle`.
    pub fn ne(self, name: &str, needle: impl Into<EntryNeedle<P>>) -> Result<Self, BuildError> {
        self.add_attribute(name, needle.into().inverse())
    }

    /// Descends only into directories whose attribute `name` matches `needle`.
    pub fn in_(self, name: &str, needle: impl Into<EntryNeedle<P>>) -> Result<Self, BuildError> {
        self.add_attribute(name, needle.into().dirs().traversal())
    }

    /// Descends only into directories whose attribute `name` does not match
    /// `needle`.
    pub fn nin(self, name: &str, needle: impl Into<EntryNeedle<P>>) -> Result<Self, BuildError> {
        self.add_attribute(name, needle.into().dirs().traversal().inverse())
    }
}

impl<P: PathEntity> Clone for PathIterator<P> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P: PathEntity> fmt::Debug for PathIterator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathIterator")
            .field("root", &self.root)
            .field("criteria", &self.store.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<'a, P: PathEntity> IntoIterator for &'a PathIterator<P> {
    type Item = <Walk<'a, P> as Iterator>::Item;
    type IntoIter = Walk<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
