#![deny(unsafe_code)]

//! Temporary directory trees for walker tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Entries of the tree used throughout the walker tests.
pub const SAMPLE_TREE: &[&str] = &["1.txt", "bar/2.txt", "boo/3.txt", "boo/baz/4.txt"];

/// A directory tree that lives as long as the fixture.
#[derive(Debug)]
pub struct TreeFixture {
    dir: TempDir,
    root: PathBuf,
}

impl TreeFixture {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while creating the temporary directory.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("tree");
        fs::create_dir(&root)?;
        Ok(Self { dir, root })
    }

    /// Creates a tree holding `entries`, relative to the root.
    ///
    /// A trailing `/` creates a directory; anything else is an empty file
    /// whose parents are created as needed.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised while populating the tree.
    pub fn with_entries(entries: &[&str]) -> io::Result<Self> {
        let fixture = Self::new()?;
        for entry in entries {
            fixture.add(entry)?;
        }
        Ok(fixture)
    }

    /// The `{1.txt, bar/2.txt, boo/3.txt, boo/baz/4.txt}` tree.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised while populating the tree.
    pub fn sample() -> io::Result<Self> {
        Self::with_entries(SAMPLE_TREE)
    }

    /// Adds one entry, following the rules of [`with_entries`](Self::with_entries).
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while creating the entry.
    pub fn add(&self, entry: &str) -> io::Result<PathBuf> {
        let path = self.root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path)?;
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, b"")?;
        }
        Ok(path)
    }

    /// Root of the tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// The temporary directory holding the root, for entries that must live
    /// outside the walked tree.
    #[must_use]
    pub fn scratch(&self) -> &Path {
        self.dir.path()
    }
}
