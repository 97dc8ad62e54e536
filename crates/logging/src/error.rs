//! crates/logging/src/error.rs
//! Errors raised by the facility and the level-aware error wrapper.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::level::{LEVEL_NAMES, LevelState};

/// Cause recorded when a requested level is not one of [`LEVEL_NAMES`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("got incorrect log level: '{rejected}', expected one of: {}", quoted(.allowed))]
pub struct InvalidLevelError {
    rejected: String,
    allowed: &'static [&'static str],
}

impl InvalidLevelError {
    /// Creates an error for `rejected`.
    #[must_use]
    pub fn new(rejected: &str) -> Self {
        Self {
            rejected: rejected.to_owned(),
            allowed: &LEVEL_NAMES,
        }
    }

    /// Returns the value that failed validation.
    #[must_use]
    pub fn rejected(&self) -> &str {
        &self.rejected
    }

    /// Returns the full set of accepted level names.
    #[must_use]
    pub const fn allowed(&self) -> &'static [&'static str] {
        self.allowed
    }
}

fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wrapper whose rendering follows the facility level active at display time.
///
/// The wrapped cause is stored as-is; nothing is rendered at construction.
/// Each time the value is displayed the attached [`LevelState`] selects the
/// [`ErrorFormat`](crate::ErrorFormat), so one stored error can print
/// concisely before a switch to [`Level::Devel`](crate::Level::Devel) and
/// with its cause chain afterwards.
pub struct LogLevelError {
    cause: Box<dyn Error + Send + Sync + 'static>,
    level: Arc<LevelState>,
    backtrace: Backtrace,
}

impl LogLevelError {
    /// Wraps `cause`, binding its rendering to `level`.
    #[must_use]
    pub fn new<E>(cause: E, level: Arc<LevelState>) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        Self {
            cause: cause.into(),
            level,
            backtrace: Backtrace::capture(),
        }
    }

    /// Builds the invalid-level error for `rejected`.
    #[cold]
    #[must_use]
    pub fn rejected_level(rejected: &str, level: Arc<LevelState>) -> Self {
        Self::new(InvalidLevelError::new(rejected), level)
    }

    /// Returns the wrapped cause.
    #[must_use]
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    /// Returns the invalid-level details when this error reports a rejected level.
    #[must_use]
    pub fn invalid_level(&self) -> Option<&InvalidLevelError> {
        self.cause.downcast_ref::<InvalidLevelError>()
    }

    /// Returns the backtrace captured at construction.
    ///
    /// It is only populated when backtraces are enabled through
    /// `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE`.
    #[must_use]
    pub const fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Consumes the wrapper and returns the cause.
    #[must_use]
    pub fn into_cause(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.cause
    }
}

impl fmt::Display for LogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = self.level.error_format();
        format.write_chain(f, self.cause.as_ref())?;
        if format.is_detailed() && self.backtrace.status() == BacktraceStatus::Captured {
            write!(f, "\nstack backtrace:\n{}", self.backtrace)?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogLevelError")
            .field("cause", &self.cause)
            .field("level", &self.level.current())
            .finish_non_exhaustive()
    }
}

impl Error for LogLevelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}
