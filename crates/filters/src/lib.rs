#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` holds the predicate language used by the directory walker. A
//! [`Needle`] describes one test (a literal value, a glob, a regular
//! expression, or a callback) together with its [`Options`]. Registering a
//! needle in a [`CriteriaStore`] compiles it into a [`Criterion`] and files it
//! under one or more [`BucketName`]s. [`evaluate`] then answers either "should
//! this entry be reported" ([`MatchMode::Match`]) or "should this directory be
//! descended into" ([`MatchMode::Traversal`]) for any [`Subject`].
//!
//! # Design
//!
//! - Each bucket keeps four lists, one per [`NeedleKind`], so evaluation order
//!   (value, pattern, regex, callback) does not depend on registration order.
//! - Globs are compiled with `globset`: `*` stops at `/` and `**` crosses it.
//!   Unanchored globs compare against the basename, globs led by `*` against
//!   the root-relative path.
//! - Callbacks are shared behind [`Arc`](std::sync::Arc) so cloning a store is
//!   cheap and never duplicates closure state.
//!
//! # Invariants
//!
//! - A traversal criterion is only consulted in [`MatchMode::Traversal`] and
//!   every other criterion only in [`MatchMode::Match`].
//! - All applicable criteria must pass; the first failure ends the evaluation
//!   and drops any merged `finish`/`depth`.
//! - A bucket with no applicable criteria passes.
//!
//! # Errors
//!
//! [`CriteriaStore::add`] reports [`PatternError`] for a glob or regex that
//! does not compile. [`evaluate`] reports [`MatchError::UnknownAttribute`] when
//! a criterion names an attribute the subject cannot resolve.
//!
//! # Examples
//!
//! ```
//! use std::borrow::Cow;
//! use filters::{evaluate, AttrValue, BucketName, CriteriaStore, MatchMode, Needle, Subject};
//!
//! struct Name(&'static str);
//!
//! impl Subject for Name {
//!     fn full_path(&self) -> Cow<'_, str> { Cow::Borrowed(self.0) }
//!     fn relative_path(&self) -> Cow<'_, str> { Cow::Borrowed(self.0) }
//!     fn basename(&self) -> Cow<'_, str> { Cow::Borrowed(self.0) }
//!     fn attribute(&self, _name: &str) -> Option<AttrValue> { None }
//! }
//!
//! let mut store = CriteriaStore::new();
//! store.add(Needle::pattern("*.txt")).unwrap();
//! store.add(Needle::value("skip.txt").inverse()).unwrap();
//!
//! let paths = store.bucket(BucketName::Paths);
//! assert!(evaluate(paths, MatchMode::Match, &Name("notes.txt")).unwrap().passed);
//! assert!(!evaluate(paths, MatchMode::Match, &Name("skip.txt")).unwrap().passed);
//! assert!(!evaluate(paths, MatchMode::Match, &Name("notes.md")).unwrap().passed);
//! ```
//!
//! # See also
//!
//! - [`globset`] and [`regex`] for the matching primitives used internally.

mod criterion;
pub mod debug_filter;
mod engine;
mod error;
mod needle;
mod options;
mod store;
mod subject;
mod value;

pub use criterion::Criterion;
pub use engine::{MatchMode, Verdict, evaluate};
pub use error::{MatchError, PatternError};
pub use needle::{Needle, NeedleKind, Predicate};
pub use options::{Options, RegexFlags};
pub use store::{BASENAME_ATTRIBUTE, Bucket, BucketName, CriteriaStore};
pub use subject::{Haystack, Subject};
pub use value::AttrValue;
