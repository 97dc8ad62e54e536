//! crates/logging/src/channel.rs
//! The four fixed channels and their prefixes.

use std::fmt;

/// One of the four logical log streams.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    /// General progress output.
    Info,
    /// Recoverable problems.
    Warning,
    /// Failures.
    Error,
    /// Diagnostics only forwarded in [`Level::Devel`](crate::Level::Devel).
    Debug,
}

impl Channel {
    /// Every channel, in registry order.
    pub const ALL: [Self; 4] = [Self::Info, Self::Warning, Self::Error, Self::Debug];

    /// Returns the channel name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Debug => "debug",
        }
    }

    /// Returns the fixed prefix written before every line.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Info => "INFO: ",
            Self::Warning => "WARNING: ",
            Self::Error => "ERROR: ",
            Self::Debug => "DEBUG: ",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Info => 0,
            Self::Warning => 1,
            Self::Error => 2,
            Self::Debug => 3,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
