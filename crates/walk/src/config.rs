use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::entry::WalkEntry;

/// Shared comparator used by [`SortOrder::By`].
pub type Comparator<P> = Arc<dyn Fn(&WalkEntry<P>, &WalkEntry<P>) -> Ordering + Send + Sync>;

/// How a pass orders its output before streaming it.
pub enum SortOrder<P> {
    /// Ascending by full path.
    Natural,
    /// Caller-supplied comparator.
    By(Comparator<P>),
}

impl<P> Clone for SortOrder<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Natural => Self::Natural,
            Self::By(comparator) => Self::By(Arc::clone(comparator)),
        }
    }
}

impl<P> fmt::Debug for SortOrder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Natural => f.write_str("Natural"),
            Self::By(_) => f.write_str("By(<comparator>)"),
        }
    }
}

/// Walk configuration, read-only while a pass is running.
pub struct WalkerConfig<P> {
    pub(crate) depth: i64,
    pub(crate) yield_files_balance: i32,
    pub(crate) yield_dirs_balance: i32,
    pub(crate) sort: Option<SortOrder<P>>,
    pub(crate) reverse: bool,
    pub(crate) ignore_errors: bool,
}

impl<P> WalkerConfig<P> {
    /// Depth budget of the root frame; negative means unbounded.
    #[must_use]
    pub const fn depth(&self) -> i64 {
        self.depth
    }

    /// Whether files take part in the output.
    #[must_use]
    pub const fn yields_files(&self) -> bool {
        self.yield_files_balance > 0
    }

    /// Whether directories take part in the output.
    #[must_use]
    pub const fn yields_dirs(&self) -> bool {
        self.yield_dirs_balance > 0
    }

    /// Net balance of `files()` against `dirs()` calls, starting at 1.
    #[must_use]
    pub const fn files_balance(&self) -> i32 {
        self.yield_files_balance
    }

    /// Net balance of `dirs()` against `files()` calls, starting at 1.
    #[must_use]
    pub const fn dirs_balance(&self) -> i32 {
        self.yield_dirs_balance
    }

    /// Configured ordering, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortOrder<P>> {
        self.sort.as_ref()
    }

    /// Whether the output is reversed after sorting.
    #[must_use]
    pub const fn reverse(&self) -> bool {
        self.reverse
    }

    /// Whether unreadable directories are skipped instead of ending the walk.
    #[must_use]
    pub const fn ignore_errors(&self) -> bool {
        self.ignore_errors
    }

    /// Whether a pass must buffer its output before yielding.
    pub(crate) const fn buffers(&self) -> bool {
        self.sort.is_some() || self.reverse
    }

    /// Shifts the balance towards files (`true`) or away from them.
    pub(crate) const fn shift_files(&mut self, include: bool) {
        if include {
            self.yield_files_balance += 1;
            self.yield_dirs_balance -= 1;
        } else {
            self.yield_files_balance -= 1;
            self.yield_dirs_balance += 1;
        }
    }
}

impl<P> Default for WalkerConfig<P> {
    fn default() -> Self {
        Self {
            depth: -1,
            yield_files_balance: 1,
            yield_dirs_balance: 1,
            sort: None,
            reverse: false,
            ignore_errors: false,
        }
    }
}

impl<P> Clone for WalkerConfig<P> {
    fn clone(&self) -> Self {
        Self {
            depth: self.depth,
            yield_files_balance: self.yield_files_balance,
            yield_dirs_balance: self.yield_dirs_balance,
            sort: self.sort.clone(),
            reverse: self.reverse,
            ignore_errors: self.ignore_errors,
        }
    }
}

impl<P> fmt::Debug for WalkerConfig<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkerConfig")
            .field("depth", &self.depth)
            .field("yield_files_balance", &self.yield_files_balance)
            .field("yield_dirs_balance", &self.yield_dirs_balance)
            .field("sort", &self.sort)
            .field("reverse", &self.reverse)
            .field("ignore_errors", &self.ignore_errors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FsPath;

    type Config = WalkerConfig<FsPath>;

    #[test]
    fn defaults_yield_everything_unbounded() {
        let config = Config::default();
        assert_eq!(config.depth(), -1);
        assert!(config.yields_files());
        assert!(config.yields_dirs());
        assert!(!config.buffers());
        assert!(!config.ignore_errors());
    }

    #[test]
    fn shifting_balances_is_algebraic() {
        let mut config = Config::default();
        config.shift_files(true);
        assert!(config.yields_files());
        assert!(!config.yields_dirs());

        config.shift_files(false);
        assert_eq!((config.files_balance(), config.dirs_balance()), (1, 1));

        config.shift_files(true);
        config.shift_files(true);
        config.shift_files(false);
        assert_eq!((config.files_balance(), config.dirs_balance()), (2, 0));
        assert!(!config.yields_dirs());
    }

    #[test]
    fn reverse_alone_buffers() {
        let mut config = Config::default();
        config.reverse = true;
        assert!(config.buffers());
    }
}
