use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};

use crate::needle::Source;
use crate::{
    AttrValue, Haystack, MatchError, Needle, NeedleKind, Options, PatternError, Predicate, Subject,
};

/// Which part of the path a textual needle is compared against when no
/// attribute is selected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Scope {
    Full,
    Relative,
    Basename,
}

impl Scope {
    /// Texts containing `/` address a path: absolute ones the full path,
    /// others the root-relative path. Anything else addresses the basename.
    fn for_text(text: &str) -> Self {
        if text.starts_with('/') {
            Self::Full
        } else if text.contains('/') {
            Self::Relative
        } else {
            Self::Basename
        }
    }

    /// Globs led by `*` are anchored at the walk root so `*.txt` stays shallow
    /// while `**/*.txt` reaches every level.
    fn for_glob(glob: &str) -> Self {
        if glob.starts_with('*') {
            Self::Relative
        } else {
            Self::for_text(glob)
        }
    }

    fn select<'s, S: Subject + ?Sized>(self, subject: &'s S) -> Cow<'s, str> {
        match self {
            Self::Full => subject.full_path(),
            Self::Relative => subject.relative_path(),
            Self::Basename => subject.basename(),
        }
    }
}

enum Matcher<S: ?Sized> {
    Value(AttrValue),
    Pattern { glob: GlobMatcher, scope: Scope },
    Regex(Regex),
    Callback(Predicate<S>),
}

impl<S: ?Sized> Clone for Matcher<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Pattern { glob, scope } => Self::Pattern {
                glob: glob.clone(),
                scope: *scope,
            },
            Self::Regex(re) => Self::Regex(re.clone()),
            Self::Callback(predicate) => Self::Callback(Arc::clone(predicate)),
        }
    }
}

/// A registered, compiled criterion.
///
/// Globs and regexes are compiled once when the criterion is built, so a
/// walk never fails on a malformed pattern.
pub struct Criterion<S: ?Sized> {
    matcher: Matcher<S>,
    source: Option<String>,
    options: Options,
}

impl<S: ?Sized> Criterion<S> {
    /// Compiles a needle into a criterion.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when a glob or regex does not compile.
    pub fn compile(needle: Needle<S>) -> Result<Self, PatternError> {
        let Needle { source, options } = needle;
        let (matcher, source) = match source {
            Source::Value(value) => {
                let text = value.as_text().map(str::to_owned);
                (Matcher::Value(value), text)
            }
            Source::Pattern(pattern) => {
                let glob = compile_glob(&pattern, &options)?;
                let scope = Scope::for_glob(&pattern);
                (Matcher::Pattern { glob, scope }, Some(pattern))
            }
            Source::Regex(pattern) => {
                let re = compile_regex(&pattern, &options)?;
                (Matcher::Regex(re), Some(pattern))
            }
            Source::Callback(predicate) => (Matcher::Callback(predicate), None),
        };
        Ok(Self {
            matcher,
            source,
            options,
        })
    }

    /// The kind of needle this criterion was built from.
    #[must_use]
    pub const fn kind(&self) -> NeedleKind {
        match self.matcher {
            Matcher::Value(_) => NeedleKind::Value,
            Matcher::Pattern { .. } => NeedleKind::Pattern,
            Matcher::Regex(_) => NeedleKind::Regex,
            Matcher::Callback(_) => NeedleKind::Callback,
        }
    }

    /// The needle's text, when it had any.
    #[must_use]
    pub fn source_text(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The options the criterion was registered with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    pub(crate) fn set_attribute(&mut self, name: &str) {
        self.options.attribute = Some(name.to_owned());
    }
}

impl<S: Subject + ?Sized> Criterion<S> {
    /// Evaluates the criterion, inversion included.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::UnknownAttribute`] when the criterion names an
    /// attribute the subject does not expose.
    pub fn matches(&self, subject: &S) -> Result<bool, MatchError> {
        Ok(self.raw_match(subject)? != self.options.inverse)
    }

    fn raw_match(&self, subject: &S) -> Result<bool, MatchError> {
        if let Some(name) = &self.options.attribute {
            let value = subject
                .attribute(name)
                .ok_or_else(|| MatchError::UnknownAttribute { name: name.clone() })?;
            return Ok(match &self.matcher {
                Matcher::Value(needle) => *needle == value,
                Matcher::Pattern { glob, .. } => glob.is_match(value.to_string()),
                Matcher::Regex(re) => re.is_match(&value.to_string()),
                Matcher::Callback(predicate) => predicate(&Haystack::Value(value)),
            });
        }

        Ok(match &self.matcher {
            Matcher::Value(needle) => needle
                .as_text()
                .is_some_and(|text| Scope::for_text(text).select(subject) == text),
            Matcher::Pattern { glob, scope } => glob.is_match(&*scope.select(subject)),
            Matcher::Regex(re) => re.is_match(&subject.full_path()),
            Matcher::Callback(predicate) => predicate(&Haystack::Subject(subject)),
        })
    }
}

fn compile_glob(pattern: &str, options: &Options) -> Result<GlobMatcher, PatternError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .case_insensitive(options.case_insensitive.unwrap_or(cfg!(windows)))
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| PatternError::Glob {
            pattern: pattern.to_owned(),
            source,
        })
}

fn compile_regex(pattern: &str, options: &Options) -> Result<Regex, PatternError> {
    RegexBuilder::new(pattern)
        .case_insensitive(options.case_insensitive.unwrap_or(false))
        .multi_line(options.regex.multi_line)
        .dot_matches_new_line(options.regex.dot_matches_new_line)
        .ignore_whitespace(options.regex.ignore_whitespace)
        .build()
        .map_err(|source| PatternError::Regex {
            pattern: pattern.to_owned(),
            source,
        })
}

impl<S: ?Sized> Clone for Criterion<S> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            source: self.source.clone(),
            options: self.options.clone(),
        }
    }
}

impl<S: ?Sized> fmt::Debug for Criterion<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criterion")
            .field("kind", &self.kind())
            .field("source", &self.source)
            .field("options", &self.options)
            .finish()
    }
}
