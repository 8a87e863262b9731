//! Closed registry of entry attributes usable by criteria.
//!
//! Builder methods such as [`PathIterator::eq`](crate::PathIterator::eq)
//! validate names against this registry when called; criteria registered with
//! [`PathIterator::add`](crate::PathIterator::add) resolve them on first use.

use std::fmt;

use filters::AttrValue;

use crate::entity::PathEntity;
use crate::entry::{WalkEntry, path_text};

/// An attribute of a [`WalkEntry`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Attribute {
    /// Full path text.
    Path,
    /// Path relative to the walk root.
    Relative,
    /// Final path component.
    Basename,
    /// Basename without its last extension.
    Fileroot,
    /// Last extension without the dot.
    Extension,
    /// Last extension with the dot, or empty.
    Suffix,
    /// Path of the containing directory.
    Parent,
    /// Components below the walk root.
    Depth,
    /// Directory flag.
    IsDir,
    /// Regular file flag.
    IsFile,
}

impl Attribute {
    /// Every attribute, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Path,
        Self::Relative,
        Self::Basename,
        Self::Fileroot,
        Self::Extension,
        Self::Suffix,
        Self::Parent,
        Self::Depth,
        Self::IsDir,
        Self::IsFile,
    ];

    /// Looks up an attribute by name or alias.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let attribute = match name {
            "path" => Self::Path,
            "relative" | "relpath" => Self::Relative,
            "basename" | "name" => Self::Basename,
            "fileroot" | "stem" => Self::Fileroot,
            "extension" | "ext" => Self::Extension,
            "suffix" => Self::Suffix,
            "parent" | "dirname" => Self::Parent,
            "depth" => Self::Depth,
            "is_dir" => Self::IsDir,
            "is_file" => Self::IsFile,
            _ => return None,
        };
        Some(attribute)
    }

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Relative => "relative",
            Self::Basename => "basename",
            Self::Fileroot => "fileroot",
            Self::Extension => "extension",
            Self::Suffix => "suffix",
            Self::Parent => "parent",
            Self::Depth => "depth",
            Self::IsDir => "is_dir",
            Self::IsFile => "is_file",
        }
    }

    /// Reads the attribute from an entry.
    pub fn read<P: PathEntity>(self, entry: &WalkEntry<P>) -> AttrValue {
        let entity = entry.entity();
        match self {
            Self::Path => path_text(entity.path()).into_owned().into(),
            Self::Relative => entry.relative_path().into(),
            Self::Basename => entry.file_name().into(),
            Self::Fileroot => entity.fileroot().into(),
            Self::Extension => entity.extension().into(),
            Self::Suffix => {
                let extension = entity.extension();
                if extension.is_empty() {
                    extension.into()
                } else {
                    format!(".{extension}").into()
                }
            }
            Self::Parent => entity
                .path()
                .parent()
                .map(|parent| path_text(parent).into_owned())
                .unwrap_or_default()
                .into(),
            Self::Depth => AttrValue::Number(i64::try_from(entry.depth()).unwrap_or(i64::MAX)),
            Self::IsDir => entity.is_dir().into(),
            Self::IsFile => entity.is_file().into(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
