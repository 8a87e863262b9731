use std::borrow::Cow;

use crate::AttrValue;

/// Something the match engine can evaluate criteria against.
///
/// The walker implements this for its entries. Paths are exposed as text with
/// `/` separators so globs and regular expressions behave the same on every
/// platform.
pub trait Subject {
    /// The full path as given by the walk root (absolute or not).
    fn full_path(&self) -> Cow<'_, str>;

    /// The path relative to the walk root, without a leading `./`.
    fn relative_path(&self) -> Cow<'_, str>;

    /// The final path component.
    fn basename(&self) -> Cow<'_, str>;

    /// Resolves a named attribute, or `None` when the name is not known.
    fn attribute(&self, name: &str) -> Option<AttrValue>;
}

/// What a callback needle receives.
///
/// Without an attribute the callback sees the subject itself; with one it sees
/// the resolved attribute value.
pub enum Haystack<'a, S: ?Sized> {
    /// The subject being evaluated.
    Subject(&'a S),
    /// The value of the criterion's attribute.
    Value(AttrValue),
}

impl<'a, S: Subject + ?Sized> Haystack<'a, S> {
    /// Returns the subject, when no attribute was selected.
    #[must_use]
    pub const fn subject(&self) -> Option<&'a S> {
        match self {
            Self::Subject(subject) => Some(*subject),
            Self::Value(_) => None,
        }
    }

    /// Returns the attribute value, when one was selected.
    #[must_use]
    pub const fn value(&self) -> Option<&AttrValue> {
        match self {
            Self::Subject(_) => None,
            Self::Value(value) => Some(value),
        }
    }

    /// Text view of the haystack: the full path of a subject, or the rendered
    /// attribute value.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Subject(subject) => subject.full_path(),
            Self::Value(AttrValue::Text(text)) => Cow::Borrowed(text),
            Self::Value(value) => Cow::Owned(value.to_string()),
        }
    }
}
