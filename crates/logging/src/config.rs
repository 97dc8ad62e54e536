//! crates/logging/src/config.rs
//! Startup configuration for a facility.

use logging_sink::LineFormat;

use crate::error::LogLevelError;
use crate::level::Level;

/// Level and line layout a host applies once at startup.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Initial verbosity level.
    pub level: Level,
    /// Layout shared by all channels.
    pub line_format: LineFormat,
}

impl LogConfig {
    /// Creates a configuration at `level` with the default layout.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Creates a configuration from a user-supplied level name.
    pub fn from_level_name(name: &str) -> Result<Self, LogLevelError> {
        Ok(Self::new(name.parse()?))
    }

    /// Replaces the level with the one named by `name`.
    ///
    /// The configuration is unchanged when `name` is rejected.
    pub fn apply_level_name(&mut self, name: &str) -> Result<(), LogLevelError> {
        self.level = name.parse()?;
        Ok(())
    }

    /// Returns a copy using `line_format`.
    #[must_use]
    pub const fn with_line_format(mut self, line_format: LineFormat) -> Self {
        self.line_format = line_format;
        self
    }
}
