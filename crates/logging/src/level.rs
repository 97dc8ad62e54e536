//! crates/logging/src/level.rs
//! Verbosity levels and the shared level cell.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::LogLevelError;
use crate::format::ErrorFormat;

/// Display names of every recognised level, in declaration order.
///
/// Host configuration layers can validate user input against this list
/// before calling [`Facility::set_level`](crate::Facility::set_level).
pub const LEVEL_NAMES: [&str; 2] = [Level::Normal.name(), Level::Devel.name()];

/// Process-wide verbosity mode.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Level {
    /// Debug channel muted, errors rendered concisely.
    #[default]
    Normal,
    /// Debug channel active, errors rendered with their cause chain.
    Devel,
}

impl Level {
    /// Every level, in declaration order.
    pub const ALL: [Self; 2] = [Self::Normal, Self::Devel];

    /// Returns the display name used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Devel => "DEVEL",
        }
    }

    /// Looks up a level by its exact display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.name() == name)
    }

    /// Returns the error rendering selected while this level is active.
    #[must_use]
    pub const fn error_format(self) -> ErrorFormat {
        match self {
            Self::Normal => ErrorFormat::Concise,
            Self::Devel => ErrorFormat::Detailed,
        }
    }

    /// Reports whether the debug channel forwards output at this level.
    #[must_use]
    pub const fn debug_enabled(self) -> bool {
        matches!(self, Self::Devel)
    }

    const fn to_bits(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Devel => 1,
        }
    }

    const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Devel,
            _ => Self::Normal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogLevelError;

    /// Parses a display name. Rejected input is reported with the full set of
    /// allowed names; the error renders concisely because no facility level
    /// is attached to it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| LogLevelError::rejected_level(s, LevelState::detached()))
    }
}

/// The single active [`Level`] shared by a facility and the errors it wraps.
///
/// Writes happen only inside a level transition; reads are lock-free so
/// rendering an error never contends with channel output.
#[derive(Debug, Default)]
pub struct LevelState {
    active: AtomicU8,
}

impl LevelState {
    /// Creates a cell holding `level`.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self {
            active: AtomicU8::new(level.to_bits()),
        }
    }

    /// Returns a standalone cell fixed at [`Level::Normal`].
    pub(crate) fn detached() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self::new(Level::Normal))
    }

    /// Returns the active level.
    #[must_use]
    pub fn current(&self) -> Level {
        Level::from_bits(self.active.load(Ordering::Acquire))
    }

    /// Returns the error rendering for the active level.
    #[must_use]
    pub fn error_format(&self) -> ErrorFormat {
        self.current().error_format()
    }

    pub(crate) fn store(&self, level: Level) {
        self.active.store(level.to_bits(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_name(level.name()), Some(level));
            assert_eq!(level.to_string(), level.name());
        }
        assert_eq!(LEVEL_NAMES, ["NORMAL", "DEVEL"]);
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!("DEVEL".parse::<Level>().ok(), Some(Level::Devel));
        for name in ["devel", "Normal", "normal", " DEVEL"] {
            let error = name.parse::<Level>().expect_err("case differs");
            assert_eq!(error.invalid_level().map(|e| e.rejected()), Some(name));
        }
    }

    #[test]
    fn parsing_rejects_unknown_names() {
        let error = "VERBOSE".parse::<Level>().expect_err("unknown level");
        let invalid = error.invalid_level().expect("invalid-level cause");
        assert_eq!(invalid.rejected(), "VERBOSE");
        assert_eq!(invalid.allowed(), &LEVEL_NAMES);
    }

    #[test]
    fn format_mapping_is_total() {
        assert_eq!(Level::Normal.error_format(), ErrorFormat::Concise);
        assert_eq!(Level::Devel.error_format(), ErrorFormat::Detailed);
    }

    #[test]
    fn default_level_is_normal() {
        assert_eq!(Level::default(), Level::Normal);
        assert_eq!(LevelState::default().current(), Level::Normal);
    }

    #[test]
    fn state_reports_last_store() {
        let state = LevelState::new(Level::Normal);
        state.store(Level::Devel);
        assert_eq!(state.current(), Level::Devel);
        assert_eq!(state.error_format(), ErrorFormat::Detailed);
        state.store(Level::Normal);
        assert_eq!(state.current(), Level::Normal);
    }
}
