//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use std::env;

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Environment variable consulted by [`VerbosityConfig::from_env`].
pub const DEBUG_ENV: &str = "DIRPATH_DEBUG";

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level (0-4).
    ///
    /// Level 1 reports walk summaries and skipped directories, level 2 adds
    /// descent and pruning decisions, level 3 adds criterion evaluation, and
    /// level 4 and above turn every debug flag to its most detailed setting.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        if level >= 1 {
            config.info.set_all(1);
        }
        if level >= 2 {
            config.debug.walk = 1;
            config.debug.prune = 1;
        }
        if level >= 3 {
            config.debug.walk = 2;
            config.debug.filter = 1;
            config.debug.sort = 1;
        }
        if level >= 4 {
            config.info.set_all(2);
            config.debug.set_all(3);
        }

        config
    }

    /// Build a configuration from the `DIRPATH_DEBUG` environment variable.
    ///
    /// The variable holds the same comma or whitespace separated tokens
    /// accepted by [`apply_debug_tokens`](Self::apply_debug_tokens). A missing
    /// variable yields the default (silent) configuration.
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::default();
        if let Ok(value) = env::var(DEBUG_ENV) {
            config.apply_debug_tokens(&value)?;
        }
        Ok(config)
    }

    /// Apply an info flag token such as `skip` or `walk2`.
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.info.set_all(level);
            return Ok(());
        }

        let flag = match name {
            "walk" => InfoFlag::Walk,
            "skip" => InfoFlag::Skip,
            _ => return Err(format!("unknown info flag: {name}")),
        };

        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a debug flag token such as `filter` or `walk2`.
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.debug.set_all(level);
            return Ok(());
        }

        let flag = DebugFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown debug flag: {name}"))?;

        self.debug.set(flag, level);
        Ok(())
    }

    /// Apply a list of debug tokens separated by commas or whitespace.
    pub fn apply_debug_tokens(&mut self, tokens: &str) -> Result<(), String> {
        tokens
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_debug_flag(token))
    }

    /// Returns `true` when no flag is enabled.
    pub fn is_silent(&self) -> bool {
        self == &Self::default()
    }
}

/// Parse a flag token like "walk2" into ("walk", 2) or "prune" into ("prune", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}
