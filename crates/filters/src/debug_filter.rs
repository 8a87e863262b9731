//! Structured tracing for criterion registration and evaluation.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag and
//! produces no-op inline functions when disabled.
//!
//! # Examples
//!
//! ```rust,ignore
//! use filters::debug_filter::{trace_criterion_added, trace_verdict};
//!
//! trace_criterion_added("files", "pattern", Some("*.txt"), false);
//! trace_verdict("bar/2.txt", "match", true);
//! ```

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "dirpath::filter";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces a criterion being added to a bucket.
///
/// # Arguments
///
/// * `bucket` - The bucket name (`paths`, `files`, `dirs`)
/// * `kind` - The needle kind (`value`, `pattern`, `regex`, `callback`)
/// * `source` - The needle text, absent for callbacks
/// * `traversal` - Whether the criterion decides descent
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_criterion_added(bucket: &str, kind: &str, source: Option<&str>, traversal: bool) {
    tracing::debug!(
        target: FILTER_TARGET,
        bucket = %bucket,
        kind = %kind,
        source = ?source,
        traversal = traversal,
        "criterion_added"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_criterion_added(_bucket: &str, _kind: &str, _source: Option<&str>, _traversal: bool) {}

/// Traces evaluation of a subject against one criterion.
///
/// # Arguments
///
/// * `path` - The root-relative path being evaluated
/// * `kind` - The needle kind
/// * `source` - The needle text, absent for callbacks
/// * `passed` - The result after inversion
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_criterion_evaluate(path: &str, kind: &str, source: Option<&str>, passed: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        kind = %kind,
        source = ?source,
        passed = passed,
        "criterion_evaluate"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_criterion_evaluate(_path: &str, _kind: &str, _source: Option<&str>, _passed: bool) {}

/// Traces the verdict of a bucket evaluation.
///
/// # Arguments
///
/// * `path` - The root-relative path that was evaluated
/// * `mode` - `match` or `traversal`
/// * `passed` - Whether every applicable criterion passed
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_verdict(path: &str, mode: &str, passed: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        mode = %mode,
        passed = passed,
        "verdict"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_verdict(_path: &str, _mode: &str, _passed: bool) {}
