use std::fmt;
use std::sync::Arc;

use crate::{AttrValue, Haystack, Options};

/// Shared predicate used by callback needles.
pub type Predicate<S> = Arc<dyn Fn(&Haystack<'_, S>) -> bool + Send + Sync>;

/// The four needle kinds, in evaluation order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum NeedleKind {
    /// Structural equality against a value.
    Value,
    /// Glob match.
    Pattern,
    /// Regular expression search.
    Regex,
    /// Arbitrary predicate.
    Callback,
}

impl NeedleKind {
    /// All kinds in evaluation order.
    pub const ALL: [Self; 4] = [Self::Value, Self::Pattern, Self::Regex, Self::Callback];

    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Pattern => "pattern",
            Self::Regex => "regex",
            Self::Callback => "callback",
        }
    }
}

pub(crate) enum Source<S: ?Sized> {
    Value(AttrValue),
    Pattern(String),
    Regex(String),
    Callback(Predicate<S>),
}

impl<S: ?Sized> Clone for Source<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Pattern(glob) => Self::Pattern(glob.clone()),
            Self::Regex(re) => Self::Regex(re.clone()),
            Self::Callback(predicate) => Self::Callback(Arc::clone(predicate)),
        }
    }
}

/// An uncompiled criterion: what to match plus how to apply it.
///
/// Options chain onto the needle before it is registered:
///
/// ```
/// use filters::{Needle, NeedleKind};
///
/// let needle: Needle<str> = Needle::pattern("build*").dirs().traversal().finish();
/// assert_eq!(needle.kind(), NeedleKind::Pattern);
/// assert!(needle.options().finish);
/// assert!(needle.options().traversal);
/// ```
pub struct Needle<S: ?Sized> {
    pub(crate) source: Source<S>,
    pub(crate) options: Options,
}

impl<S: ?Sized> Needle<S> {
    /// A needle compared by structural equality.
    #[must_use]
    pub fn value(value: impl Into<AttrValue>) -> Self {
        Self::from_source(Source::Value(value.into()))
    }

    /// A glob needle. `*` does not cross `/`; `**` does.
    #[must_use]
    pub fn pattern(glob: impl Into<String>) -> Self {
        Self::from_source(Source::Pattern(glob.into()))
    }

    /// A regular expression needle, searched rather than fully matched.
    #[must_use]
    pub fn regex(re: impl Into<String>) -> Self {
        Self::from_source(Source::Regex(re.into()))
    }

    /// A predicate needle.
    #[must_use]
    pub fn callback<F>(predicate: F) -> Self
    where
        F: Fn(&Haystack<'_, S>) -> bool + Send + Sync + 'static,
    {
        Self::from_source(Source::Callback(Arc::new(predicate)))
    }

    fn from_source(source: Source<S>) -> Self {
        Self {
            source,
            options: Options::default(),
        }
    }

    /// The kind of this needle.
    #[must_use]
    pub const fn kind(&self) -> NeedleKind {
        match self.source {
            Source::Value(_) => NeedleKind::Value,
            Source::Pattern(_) => NeedleKind::Pattern,
            Source::Regex(_) => NeedleKind::Regex,
            Source::Callback(_) => NeedleKind::Callback,
        }
    }

    /// Text the needle was built from, if it has any.
    #[must_use]
    pub fn source_text(&self) -> Option<&str> {
        match &self.source {
            Source::Value(value) => value.as_text(),
            Source::Pattern(text) | Source::Regex(text) => Some(text),
            Source::Callback(_) => None,
        }
    }

    /// The options attached so far.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Replaces all options at once.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Reinterprets a textual needle as the given kind.
    ///
    /// Only text converts: a text value, a glob, and a regex can be turned
    /// into one another. Callbacks and non-text values keep their kind.
    #[must_use]
    pub fn into_kind(self, kind: NeedleKind) -> Self {
        if kind == NeedleKind::Callback {
            return self;
        }
        let Self { source, options } = self;
        let source = match source {
            Source::Value(AttrValue::Text(text)) | Source::Pattern(text) | Source::Regex(text) => {
                match kind {
                    NeedleKind::Pattern => Source::Pattern(text),
                    NeedleKind::Regex => Source::Regex(text),
                    NeedleKind::Value | NeedleKind::Callback => Source::Value(AttrValue::Text(text)),
                }
            }
            other => other,
        };
        Self { source, options }
    }

    /// Negates the match.
    #[must_use]
    pub const fn inverse(self) -> Self {
        self.inverted(true)
    }

    /// Sets inversion explicitly.
    #[must_use]
    pub const fn inverted(mut self, inverse: bool) -> Self {
        self.options.inverse = inverse;
        self
    }

    /// Makes this a descent criterion.
    #[must_use]
    pub const fn traversal(mut self) -> Self {
        self.options.traversal = true;
        self
    }

    /// Stops descent into directories that satisfy this criterion.
    #[must_use]
    pub const fn finish(mut self) -> Self {
        self.options.finish = true;
        self
    }

    /// Replaces the depth budget below directories that satisfy this criterion.
    #[must_use]
    pub const fn depth(mut self, depth: i64) -> Self {
        self.options.depth = Some(depth);
        self
    }

    /// Compares the named attribute instead of the path.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.options.attribute = Some(name.into());
        self
    }

    /// Routes to the `files` bucket.
    #[must_use]
    pub const fn files(mut self) -> Self {
        self.options.files = true;
        self
    }

    /// Routes to the `dirs` bucket.
    #[must_use]
    pub const fn dirs(mut self) -> Self {
        self.options.dirs = true;
        self
    }

    /// Routes to the `files` bucket and compares basenames.
    #[must_use]
    pub const fn filename(mut self) -> Self {
        self.options.filename = true;
        self
    }

    /// Routes to the `dirs` bucket and compares basenames.
    #[must_use]
    pub const fn dirname(mut self) -> Self {
        self.options.dirname = true;
        self
    }

    /// Routes to both `files` and `dirs` and compares basenames.
    #[must_use]
    pub const fn basename(mut self) -> Self {
        self.options.basename = true;
        self
    }

    /// Overrides case folding for globs and regexes.
    #[must_use]
    pub const fn case_insensitive(mut self, yes: bool) -> Self {
        self.options.case_insensitive = Some(yes);
        self
    }

    /// Regex: `^`/`$` match at line boundaries.
    #[must_use]
    pub const fn multi_line(mut self, yes: bool) -> Self {
        self.options.regex.multi_line = yes;
        self
    }

    /// Regex: `.` matches newlines.
    #[must_use]
    pub const fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.options.regex.dot_matches_new_line = yes;
        self
    }

    /// Regex: ignore whitespace and allow `#` comments.
    #[must_use]
    pub const fn ignore_whitespace(mut self, yes: bool) -> Self {
        self.options.regex.ignore_whitespace = yes;
        self
    }
}

impl<S: ?Sized> Clone for Needle<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            options: self.options.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Needle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Needle")
            .field("kind", &self.kind())
            .field("source", &self.source_text())
            .field("options", &self.options)
            .finish()
    }
}

impl<S: ?Sized> From<AttrValue> for Needle<S> {
    fn from(value: AttrValue) -> Self {
        Self::value(value)
    }
}

impl<S: ?Sized> From<&str> for Needle<S> {
    fn from(value: &str) -> Self {
        Self::value(value)
    }
}

impl<S: ?Sized> From<String> for Needle<S> {
    fn from(value: String) -> Self {
        Self::value(value)
    }
}

impl<S: ?Sized> From<bool> for Needle<S> {
    fn from(value: bool) -> Self {
        Self::value(value)
    }
}

impl<S: ?Sized> From<i64> for Needle<S> {
    fn from(value: i64) -> Self {
        Self::value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_build_value_needles() {
        let needle: Needle<str> = "foo.txt".into();
        assert_eq!(needle.kind(), NeedleKind::Value);
        assert_eq!(needle.source_text(), Some("foo.txt"));

        let flag: Needle<str> = true.into();
        assert_eq!(flag.kind(), NeedleKind::Value);
        assert_eq!(flag.source_text(), None);
    }

    #[test]
    fn into_kind_converts_text_only() {
        let needle: Needle<str> = Needle::value("*.txt").finish();
        let pattern = needle.into_kind(NeedleKind::Pattern);
        assert_eq!(pattern.kind(), NeedleKind::Pattern);
        assert!(pattern.options().finish);

        let regex = pattern.into_kind(NeedleKind::Regex);
        assert_eq!(regex.kind(), NeedleKind::Regex);
        assert_eq!(regex.source_text(), Some("*.txt"));

        let callback: Needle<str> = Needle::callback(|_| true);
        assert_eq!(
            callback.into_kind(NeedleKind::Pattern).kind(),
            NeedleKind::Callback
        );

        let number: Needle<str> = Needle::value(3_i64);
        assert_eq!(number.into_kind(NeedleKind::Regex).kind(), NeedleKind::Value);
    }

    #[test]
    fn option_setters_accumulate() {
        let needle: Needle<str> = Needle::regex("a.b")
            .attribute("basename")
            .inverse()
            .depth(2)
            .case_insensitive(true)
            .multi_line(true)
            .dot_matches_new_line(true)
            .ignore_whitespace(true);
        let options = needle.options();
        assert_eq!(options.attribute.as_deref(), Some("basename"));
        assert!(options.inverse);
        assert_eq!(options.depth, Some(2));
        assert_eq!(options.case_insensitive, Some(true));
        assert!(options.regex.multi_line);
        assert!(options.regex.dot_matches_new_line);
        assert!(options.regex.ignore_whitespace);
        assert!(!needle.clone().inverted(false).options().inverse);
    }

    #[test]
    fn debug_shows_kind_and_source() {
        let needle: Needle<str> = Needle::pattern("*.rs");
        let rendered = format!("{needle:?}");
        assert!(rendered.contains("Pattern"));
        assert!(rendered.contains("*.rs"));
    }

    #[test]
    fn kinds_are_ordered_for_evaluation() {
        let mut kinds = NeedleKind::ALL;
        kinds.sort();
        assert_eq!(kinds, NeedleKind::ALL);
    }
}
