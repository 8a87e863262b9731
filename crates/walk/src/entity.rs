use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One immediate child of a directory, as reported by
/// [`PathEntity::enumerate_children`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Child {
    /// File name of the child, without any directory component.
    pub name: OsString,
    /// Whether the walker should treat the child as a directory.
    pub is_dir: bool,
}

impl Child {
    /// Creates a child record.
    pub fn new(name: impl Into<OsString>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// The capability the walker needs from a path type.
///
/// [`FsPath`] implements it on top of `std::fs`; other implementations can
/// walk archives or in-memory trees.
pub trait PathEntity: Clone + fmt::Debug {
    /// The path this entity stands for.
    fn path(&self) -> &Path;

    /// Whether the entity is a directory the walker may descend into.
    fn is_dir(&self) -> bool;

    /// Whether the entity is a regular file.
    fn is_file(&self) -> bool;

    /// Lists immediate children in any order.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that prevented the listing.
    fn enumerate_children(&self) -> io::Result<Vec<Child>>;

    /// Builds the entity for one child returned by
    /// [`enumerate_children`](Self::enumerate_children).
    fn join(&self, child: &Child) -> Self;

    /// The final path component.
    fn basename(&self) -> String {
        self.path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The basename without its last extension (`archive.tar` for
    /// `archive.tar.gz`).
    fn fileroot(&self) -> String {
        self.path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The last extension without the dot, or an empty string.
    fn extension(&self) -> String {
        self.path()
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The path relative to `base`, when it lies beneath it.
    fn relative_to(&self, base: &Path) -> Option<PathBuf> {
        self.path().strip_prefix(base).ok().map(Path::to_path_buf)
    }

    /// Identity used to detect directory cycles, or `None` when the entity
    /// cannot loop back on itself.
    fn canonical(&self) -> Option<PathBuf> {
        None
    }
}

/// A [`PathEntity`] backed by the local file system.
///
/// Symbolic links are not followed by default: a link to a directory is
/// reported as a leaf. With [`follow_symlinks`](Self::follow_symlinks) the
/// walker descends through them and tracks canonical paths to stop cycles.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FsPath {
    path: PathBuf,
    is_dir: bool,
    follow_symlinks: bool,
}

impl FsPath {
    /// Creates an entity for `path`, probing whether it is a directory.
    ///
    /// The root itself is always resolved through symlinks.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_dir = fs::metadata(&path).is_ok_and(|metadata| metadata.is_dir());
        Self {
            path,
            is_dir,
            follow_symlinks: false,
        }
    }

    /// Configures whether directory symlinks below this entity are descended.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Returns `true` when a regular file named `name` exists directly inside
    /// this directory.
    #[must_use]
    pub fn has_file(&self, name: impl AsRef<Path>) -> bool {
        self.path.join(name).is_file()
    }

    /// Returns `true` when a directory named `name` exists directly inside
    /// this directory.
    #[must_use]
    pub fn has_dir(&self, name: impl AsRef<Path>) -> bool {
        self.path.join(name).is_dir()
    }

    /// Consumes the entity and returns its path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl PathEntity for FsPath {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_dir(&self) -> bool {
        self.is_dir
    }

    fn is_file(&self) -> bool {
        !self.is_dir && self.path.is_file()
    }

    fn enumerate_children(&self) -> io::Result<Vec<Child>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let is_dir = if file_type.is_symlink() {
                self.follow_symlinks && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
            } else {
                file_type.is_dir()
            };
            children.push(Child::new(entry.file_name(), is_dir));
        }
        Ok(children)
    }

    fn join(&self, child: &Child) -> Self {
        Self {
            path: self.path.join(&child.name),
            is_dir: child.is_dir,
            follow_symlinks: self.follow_symlinks,
        }
    }

    fn canonical(&self) -> Option<PathBuf> {
        if self.follow_symlinks {
            fs::canonicalize(&self.path).ok()
        } else {
            None
        }
    }
}

impl AsRef<Path> for FsPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl From<PathBuf> for FsPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for FsPath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FsPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}
