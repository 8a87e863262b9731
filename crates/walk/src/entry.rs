use std::borrow::Cow;
use std::path::Path;

use filters::{AttrValue, Subject};

use crate::attribute::Attribute;
use crate::entity::PathEntity;

/// One entry produced by a walk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkEntry<P> {
    pub(crate) entity: P,
    pub(crate) relative_path: String,
    pub(crate) depth: usize,
}

impl<P: PathEntity> WalkEntry<P> {
    pub(crate) const fn new(entity: P, relative_path: String, depth: usize) -> Self {
        Self {
            entity,
            relative_path,
            depth,
        }
    }

    /// The underlying path entity.
    #[must_use]
    pub const fn entity(&self) -> &P {
        &self.entity
    }

    /// Consumes the entry and returns the path entity.
    #[must_use]
    pub fn into_entity(self) -> P {
        self.entity
    }

    /// The entity's path, rooted the way the walk root was given.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.entity.path()
    }

    /// Path relative to the walk root, `/`-separated.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Number of components below the root (root children have depth `1`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the entry is a directory the walker could descend into.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.entity.is_dir()
    }

    /// Whether the entry is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.entity.is_file()
    }

    /// The final path component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }
}

impl<P: PathEntity> Subject for WalkEntry<P> {
    fn full_path(&self) -> Cow<'_, str> {
        path_text(self.entity.path())
    }

    fn relative_path(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.relative_path)
    }

    fn basename(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.file_name())
    }

    fn attribute(&self, name: &str) -> Option<AttrValue> {
        Attribute::from_name(name).map(|attribute| attribute.read(self))
    }
}

/// Renders a path with `/` separators.
pub(crate) fn path_text(path: &Path) -> Cow<'_, str> {
    let text = path.to_string_lossy();
    if cfg!(windows) && text.contains('\\') {
        Cow::Owned(text.replace('\\', "/"))
    } else {
        text
    }
}
