use std::fmt;

use logging::debug_log;

use crate::debug_filter::trace_criterion_added;
use crate::{Criterion, Needle, NeedleKind, Options, PatternError};

/// Attribute forced onto criteria registered with the `filename`, `dirname`
/// or `basename` routing flags.
pub const BASENAME_ATTRIBUTE: &str = "basename";

/// The three criterion buckets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BucketName {
    /// Applies to every entry, in addition to the type-specific bucket.
    Paths,
    /// Applies to file entries.
    Files,
    /// Applies to directory entries.
    Dirs,
}

impl BucketName {
    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paths => "paths",
            Self::Files => "files",
            Self::Dirs => "dirs",
        }
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Criteria of one bucket, grouped by needle kind.
pub struct Bucket<S: ?Sized> {
    value: Vec<Criterion<S>>,
    pattern: Vec<Criterion<S>>,
    regex: Vec<Criterion<S>>,
    callback: Vec<Criterion<S>>,
}

impl<S: ?Sized> Bucket<S> {
    /// Creates an empty bucket.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: Vec::new(),
            pattern: Vec::new(),
            regex: Vec::new(),
            callback: Vec::new(),
        }
    }

    /// Criteria of the given kind, in registration order.
    #[must_use]
    pub fn criteria(&self, kind: NeedleKind) -> &[Criterion<S>] {
        match kind {
            NeedleKind::Value => &self.value,
            NeedleKind::Pattern => &self.pattern,
            NeedleKind::Regex => &self.regex,
            NeedleKind::Callback => &self.callback,
        }
    }

    /// Number of criteria across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len() + self.pattern.len() + self.regex.len() + self.callback.len()
    }

    /// Returns `true` when no criterion is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, criterion: Criterion<S>) {
        let list = match criterion.kind() {
            NeedleKind::Value => &mut self.value,
            NeedleKind::Pattern => &mut self.pattern,
            NeedleKind::Regex => &mut self.regex,
            NeedleKind::Callback => &mut self.callback,
        };
        list.push(criterion);
    }
}

impl<S: ?Sized> Default for Bucket<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> Clone for Bucket<S> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            pattern: self.pattern.clone(),
            regex: self.regex.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Bucket<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("value", &self.value)
            .field("pattern", &self.pattern)
            .field("regex", &self.regex)
            .field("callback", &self.callback)
            .finish()
    }
}

/// All registered criteria of one builder.
pub struct CriteriaStore<S: ?Sized> {
    paths: Bucket<S>,
    files: Bucket<S>,
    dirs: Bucket<S>,
}

impl<S: ?Sized> CriteriaStore<S> {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paths: Bucket::new(),
            files: Bucket::new(),
            dirs: Bucket::new(),
        }
    }

    /// Returns the named bucket.
    #[must_use]
    pub const fn bucket(&self, name: BucketName) -> &Bucket<S> {
        match name {
            BucketName::Paths => &self.paths,
            BucketName::Files => &self.files,
            BucketName::Dirs => &self.dirs,
        }
    }

    /// Number of registered criteria across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len() + self.files.len() + self.dirs.len()
    }

    /// Returns `true` when no criterion is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compiles `needle` and stores it in the buckets its options route to.
    ///
    /// Returns the buckets the criterion landed in.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the glob or regex does not compile. The
    /// store is left unchanged in that case.
    pub fn add(&mut self, needle: Needle<S>) -> Result<Vec<BucketName>, PatternError> {
        let (targets, force_basename) = route(needle.options());
        let mut criterion = Criterion::compile(needle)?;
        if force_basename {
            criterion.set_attribute(BASENAME_ATTRIBUTE);
        }

        for name in &targets {
            debug_log!(
                Filter,
                1,
                "registered {} criterion {:?} in {}",
                criterion.kind().name(),
                criterion.source_text().unwrap_or("<callback>"),
                name
            );
            trace_criterion_added(
                name.name(),
                criterion.kind().name(),
                criterion.source_text(),
                criterion.options().traversal,
            );
        }

        if let Some((last, rest)) = targets.split_last() {
            for name in rest {
                self.bucket_mut(*name).push(criterion.clone());
            }
            self.bucket_mut(*last).push(criterion);
        }
        Ok(targets)
    }

    fn bucket_mut(&mut self, name: BucketName) -> &mut Bucket<S> {
        match name {
            BucketName::Paths => &mut self.paths,
            BucketName::Files => &mut self.files,
            BucketName::Dirs => &mut self.dirs,
        }
    }
}

/// Resolves the destination buckets and whether the basename is compared.
fn route(options: &Options) -> (Vec<BucketName>, bool) {
    let mut targets = Vec::with_capacity(2);

    if options.filename || options.dirname || options.basename {
        if options.filename || options.basename {
            targets.push(BucketName::Files);
        }
        if options.dirname || options.basename {
            targets.push(BucketName::Dirs);
        }
        return (targets, true);
    }

    if options.files {
        targets.push(BucketName::Files);
    }
    if options.dirs {
        targets.push(BucketName::Dirs);
    }
    if targets.is_empty() {
        targets.push(BucketName::Paths);
    }
    (targets, false)
}

impl<S: ?Sized> Default for CriteriaStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> Clone for CriteriaStore<S> {
    fn clone(&self) -> Self {
        Self {
            paths: self.paths.clone(),
            files: self.files.clone(),
            dirs: self.dirs.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for CriteriaStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriteriaStore")
            .field("paths", &self.paths)
            .field("files", &self.files)
            .field("dirs", &self.dirs)
            .finish()
    }
}
