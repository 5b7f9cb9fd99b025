// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity levels and the process-wide threshold.
//!
//! Levels are ordered by verbosity: [`Level::Error`] is the most restrictive setting and
//! [`Level::All`] the most verbose. A leveled method gated at `L` runs only when the
//! threshold is `>= L`.
//!
//! ```
//! use multilog::{Level, set_log_level, is_enabled};
//! # let _guard = multilog::hidden::test_guard();
//! set_log_level(Level::Warning);
//! assert!(is_enabled(Level::Error));
//! assert!(!is_enabled(Level::Info));
//! # multilog::hidden::reset_for_test();
//! ```

use crate::error::LogError;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Name of the environment variable read by [`init_from_env`].
pub const LEVEL_ENV: &str = "MULTILOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Only failures.
    Error = 0,
    /// Suspicious conditions and failures.
    Warning = 1,
    /// Regular operational messages. The default threshold.
    #[default]
    Info = 2,
    /// Print-style debugging.
    Debug = 3,
    /// Everything.
    All = 4,
}

const LEVELS: [Level; 5] = [
    Level::Error,
    Level::Warning,
    Level::Info,
    Level::Debug,
    Level::All,
];

static THRESHOLD: AtomicU8 = AtomicU8::new(Level::Info as u8);

impl Level {
    /// Parses either an ordinal (`0` through `4`) or a level name.
    ///
    /// Names are matched without regard to case.
    pub fn parse(token: &str) -> Result<Level, LogError> {
        let token = token.trim();
        if let Ok(ordinal) = token.parse::<u8>() {
            return Level::from_ordinal(ordinal)
                .ok_or_else(|| LogError::InvalidLevel(token.to_string()));
        }
        LEVELS
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| LogError::InvalidLevel(token.to_string()))
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Level> {
        LEVELS.get(ordinal as usize).copied()
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::All => "ALL",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s)
    }
}

impl serde::Serialize for Level {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Sets the process-wide threshold.
pub fn set_log_level(level: Level) {
    THRESHOLD.store(level as u8, Ordering::Relaxed);
}

/// Returns the process-wide threshold.
pub fn log_level() -> Level {
    // only `set_log_level` stores, so the value is always a valid ordinal
    Level::from_ordinal(THRESHOLD.load(Ordering::Relaxed)).unwrap_or_default()
}

/// Whether a method gated at `level` currently produces output.
#[inline]
pub fn is_enabled(level: Level) -> bool {
    log_level() >= level
}

/// Applies the threshold named by the `MULTILOG_LEVEL` environment variable, if set.
///
/// Returns the level now in effect. A malformed value is reported and the threshold is
/// left as it was.
pub fn init_from_env() -> Result<Level, LogError> {
    if let Ok(token) = std::env::var(LEVEL_ENV) {
        set_log_level(Level::parse(&token)?);
    }
    Ok(log_level())
}

/*
Boilerplate notes for Level:

- Copy/Clone/Eq/Ord/Hash: derived, declaration order is the verbosity order
- Default: Info, matching the threshold at process start
- Display: the canonical upper-case name, which Level::parse accepts back
- Serialize: same name, used by the structured rendering
*/
