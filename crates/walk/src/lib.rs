#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the lazy, filtered, depth-bounded directory walker. A
//! [`PathIterator`] holds a root [`PathEntity`], the registered criteria and
//! the walk configuration. Each call to [`PathIterator::iter`] starts an
//! independent [`Walk`] pass that yields [`WalkEntry`] values in pre-order:
//! all files of a directory first, then each subdirectory followed by its
//! whole subtree.
//!
//! # Design
//!
//! - [`Walk`] is an explicit state machine: a stack of directory frames, each
//!   holding its pending file children, its pending directory children and
//!   its remaining depth budget, plus one pending descent. A directory is only
//!   entered on the `next()` call after it was reported, so
//!   [`Walk::finish`] issued by the consumer still prunes it.
//! - Criteria live in a [`filters::CriteriaStore`]. Files are checked against
//!   the `files` and `paths` buckets, directories against `dirs` and `paths`
//!   for reporting and `dirs` in traversal mode for descent.
//! - [`Attribute`] is the closed registry behind [`PathIterator::eq`],
//!   [`PathIterator::ne`], [`PathIterator::in_`] and [`PathIterator::nin`].
//! - [`FsPath`] implements [`PathEntity`] over `std::fs`. Symbolic links are
//!   leaves unless [`FsPath::follow_symlinks`] is enabled, in which case
//!   canonical paths are tracked per pass to stop cycles.
//!
//! # Invariants
//!
//! - Children are visited in name order, so a pass is deterministic for a
//!   given tree.
//! - A frame with a depth budget of `0` is never entered; negative budgets are
//!   unbounded.
//! - Traversal criteria decide descent only; every other criterion decides
//!   reporting only.
//! - Pruning state belongs to one pass and never leaks into the next.
//!
//! # Errors
//!
//! A directory that cannot be read ends the pass with
//! [`WalkErrorKind::ReadDir`] unless [`PathIterator::ignore_errors`] is set. A
//! criterion naming an unknown attribute ends it with
//! [`WalkErrorKind::Evaluate`]. Registration reports [`PatternError`] or
//! [`BuildError`] immediately.
//!
//! # Examples
//!
//! ```
//! use walk::{FsPath, PathIterator};
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::create_dir_all(temp.path().join("nested/deeper"))?;
//! std::fs::write(temp.path().join("top.txt"), b"")?;
//! std::fs::write(temp.path().join("nested/deeper/low.txt"), b"")?;
//!
//! let walker = PathIterator::new(FsPath::new(temp.path())).depth(2);
//! let seen: Vec<String> = walker
//!     .iter()
//!     .map(|entry| entry.map(|entry| entry.relative_path().to_owned()))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(seen, ["top.txt", "nested", "nested/deeper"]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```
//!
//! # See also
//!
//! - [`filters`] for the needle kinds and the evaluation rules.
//! - [`logging`] for the `walk`, `prune` and `sort` debug categories.

mod attribute;
mod builder;
mod config;
mod entity;
mod entry;
mod error;
mod sequence;
mod walker;

pub use attribute::Attribute;
pub use builder::{EntryNeedle, PathIterator};
pub use config::{Comparator, SortOrder, WalkerConfig};
pub use entity::{Child, FsPath, PathEntity};
pub use entry::WalkEntry;
pub use error::{BuildError, WalkError, WalkErrorKind};
pub use filters::{AttrValue, Haystack, MatchError, Needle, PatternError};
pub use walker::Walk;

#[cfg(test)]
mod tests;
