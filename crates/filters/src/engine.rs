use logging::debug_log;

use crate::debug_filter::{trace_criterion_evaluate, trace_verdict};
use crate::{Bucket, MatchError, NeedleKind, Subject};

/// Which question an evaluation answers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MatchMode {
    /// Should the entry be reported?
    Match,
    /// Should the directory be descended into?
    Traversal,
}

impl MatchMode {
    /// Lowercase name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::Traversal => "traversal",
        }
    }
}

/// Outcome of evaluating one bucket against one subject.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Verdict {
    /// Every applicable criterion was satisfied.
    pub passed: bool,
    /// Some satisfied criterion asked to stop descending.
    pub finish: bool,
    /// Depth budget from the last satisfied criterion that carried one.
    pub depth: Option<i64>,
}

impl Verdict {
    /// A passing verdict with nothing merged.
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            finish: false,
            depth: None,
        }
    }

    /// A failing verdict. Failure clears merged options.
    #[must_use]
    pub const fn fail() -> Self {
        Self {
            passed: false,
            finish: false,
            depth: None,
        }
    }
}

/// Evaluates the criteria of `bucket` that belong to `mode`.
///
/// Kinds are checked value, pattern, regex, then callback; every criterion
/// must pass and the first failure ends the evaluation. An empty selection
/// passes.
///
/// # Errors
///
/// Returns [`MatchError`] when a criterion cannot be evaluated against the
/// subject.
pub fn evaluate<S: Subject + ?Sized>(
    bucket: &Bucket<S>,
    mode: MatchMode,
    subject: &S,
) -> Result<Verdict, MatchError> {
    let traversal = mode == MatchMode::Traversal;
    let path = subject.relative_path();
    let mut verdict = Verdict::pass();

    for kind in NeedleKind::ALL {
        let applicable = bucket
            .criteria(kind)
            .iter()
            .filter(|criterion| criterion.options().traversal == traversal);

        for criterion in applicable {
            let passed = criterion.matches(subject)?;
            trace_criterion_evaluate(&path, kind.name(), criterion.source_text(), passed);

            if !passed {
                debug_log!(
                    Filter,
                    2,
                    "{} rejected by {} {:?} ({})",
                    path,
                    kind.name(),
                    criterion.source_text().unwrap_or("<callback>"),
                    mode.name()
                );
                trace_verdict(&path, mode.name(), false);
                return Ok(Verdict::fail());
            }

            let options = criterion.options();
            verdict.finish |= options.finish;
            if options.depth.is_some() {
                verdict.depth = options.depth;
            }
        }
    }

    trace_verdict(&path, mode.name(), true);
    Ok(verdict)
}
