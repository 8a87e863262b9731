//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Per-pass walk summaries.
    Walk,
    /// Directories skipped because they could not be read.
    Skip,
}

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Directory enumeration and descent.
    Walk,
    /// Criterion registration and evaluation.
    Filter,
    /// Subtrees excluded by `finish` or the pruned set.
    Prune,
    /// Materialization, sorting, and reversal of results.
    Sort,
}

impl InfoFlag {
    /// Returns the token used on the command line and in `DIRPATH_DEBUG`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Skip => "skip",
        }
    }
}

impl DebugFlag {
    /// All debug flags, in declaration order.
    pub const ALL: [Self; 4] = [Self::Walk, Self::Filter, Self::Prune, Self::Sort];

    /// Returns the token used on the command line and in `DIRPATH_DEBUG`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Filter => "filter",
            Self::Prune => "prune",
            Self::Sort => "sort",
        }
    }

    /// Returns the `tracing` target events for this flag are emitted under.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Walk => "dirpath::walk",
            Self::Filter => "dirpath::filter",
            Self::Prune => "dirpath::prune",
            Self::Sort => "dirpath::sort",
        }
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InfoLevels {
    /// Walk summary level.
    pub walk: u8,
    /// Skipped directory level.
    pub skip: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Walk => self.walk,
            InfoFlag::Skip => self.skip,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Walk => self.walk = level,
            InfoFlag::Skip => self.skip = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.walk = level;
        self.skip = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DebugLevels {
    /// Directory enumeration level.
    pub walk: u8,
    /// Criterion evaluation level.
    pub filter: u8,
    /// Pruning level.
    pub prune: u8,
    /// Sorting level.
    pub sort: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Walk => self.walk,
            DebugFlag::Filter => self.filter,
            DebugFlag::Prune => self.prune,
            DebugFlag::Sort => self.sort,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Walk => self.walk = level,
            DebugFlag::Filter => self.filter = level,
            DebugFlag::Prune => self.prune = level,
            DebugFlag::Sort => self.sort = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in DebugFlag::ALL {
            self.set(flag, level);
        }
    }

    /// Returns the highest level configured for any flag.
    pub fn max(&self) -> u8 {
        DebugFlag::ALL
            .iter()
            .map(|flag| self.get(*flag))
            .max()
            .unwrap_or(0)
    }
}
