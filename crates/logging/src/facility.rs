//! crates/logging/src/facility.rs
//! The leveled logger facility: channel output, level transitions and redirects.

use std::error::Error;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use logging_sink::{LineFormat, SharedDestination, discard, stderr, stdout};

use crate::channel::Channel;
use crate::config::LogConfig;
use crate::error::LogLevelError;
use crate::level::{Level, LevelState};
use crate::registry::{Destinations, LoggerRegistry};

struct Shared {
    registry: Mutex<LoggerRegistry>,
    level: Arc<LevelState>,
    standard_output: SharedDestination,
    standard_error: SharedDestination,
}

/// Handle to one set of four channels and their verbosity level.
///
/// Clones share the same state. Every operation takes `&self` and is safe to
/// call from any number of threads. A single mutex guards the registry: each
/// emit holds it while writing its line, and level transitions and redirects
/// hold it while swapping destinations, so an emit that starts after one of
/// those calls returns always sees the new configuration and a redirect is
/// never observed half-applied.
///
/// # Examples
///
/// ```
/// use logging::{Facility, Level};
/// use logging_sink::{LineFormat, MemoryBuffer, Timestamp};
///
/// let out = MemoryBuffer::new();
/// let facility = Facility::builder()
///     .standard_output(out.shared())
///     .standard_error(out.shared())
///     .line_format(LineFormat::default().with_timestamp(Timestamp::None))
///     .build();
///
/// facility.debug("hidden")?;
/// facility.set_level("DEVEL").expect("valid level");
/// facility.debug("shown")?;
///
/// assert_eq!(facility.current_level(), Level::Devel);
/// assert_eq!(out.contents(), "DEBUG: shown\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct Facility {
    shared: Arc<Shared>,
}

impl Facility {
    /// Creates a facility writing to the process streams at [`Level::Normal`].
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a facility.
    #[must_use]
    pub fn builder() -> FacilityBuilder {
        FacilityBuilder::default()
    }

    /// Creates a facility from a validated configuration, using the process streams.
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        Self::builder().config(config).build()
    }

    fn registry(&self) -> MutexGuard<'_, LoggerRegistry> {
        self.shared
            .registry
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Writes `message` as one line on `channel`.
    ///
    /// Failures of the current destination are returned unchanged and are
    /// not retried.
    pub fn emit(&self, channel: Channel, message: &str) -> io::Result<()> {
        let registry = self.registry();
        let logger = registry.logger(channel);
        let line = logger.writer().render(message)?;
        logger.write_line(&line)
    }

    /// Writes `message` on the info channel.
    pub fn info(&self, message: &str) -> io::Result<()> {
        self.emit(Channel::Info, message)
    }

    /// Writes `message` on the warning channel.
    pub fn warning(&self, message: &str) -> io::Result<()> {
        self.emit(Channel::Warning, message)
    }

    /// Writes `message` on the error channel.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.emit(Channel::Error, message)
    }

    /// Writes `message` on the debug channel.
    pub fn debug(&self, message: &str) -> io::Result<()> {
        self.emit(Channel::Debug, message)
    }

    /// Returns the active level.
    #[must_use]
    pub fn current_level(&self) -> Level {
        self.shared.level.current()
    }

    /// Returns the shared level cell that wrapped errors consult when rendered.
    #[must_use]
    pub fn level_state(&self) -> Arc<LevelState> {
        Arc::clone(&self.shared.level)
    }

    /// Validates `value` against [`LEVEL_NAMES`](crate::LEVEL_NAMES) and applies it.
    ///
    /// Rejected values leave the level and every destination untouched.
    pub fn set_level(&self, value: &str) -> Result<(), LogLevelError> {
        let level = Level::from_name(value)
            .ok_or_else(|| LogLevelError::rejected_level(value, self.level_state()))?;
        self.apply_level(level);
        Ok(())
    }

    /// Switches to `level` and resets the debug channel to the destination
    /// the level implies: discard for [`Level::Normal`], standard output for
    /// [`Level::Devel`]. Any earlier redirect of the debug channel is
    /// replaced. The other channels are not touched.
    pub fn apply_level(&self, level: Level) {
        let debug = self.level_destination(level);
        let mut registry = self.registry();
        self.shared.level.store(level);
        registry.set_destination(Channel::Debug, debug);
    }

    fn level_destination(&self, level: Level) -> SharedDestination {
        if level.debug_enabled() {
            Arc::clone(&self.shared.standard_output)
        } else {
            discard()
        }
    }

    /// Replaces the destination of all four channels in one step.
    ///
    /// Prefixes are unchanged. The debug destination given here stays in
    /// effect regardless of level until the next level transition.
    pub fn redirect(
        &self,
        info: SharedDestination,
        warning: SharedDestination,
        error: SharedDestination,
        debug: SharedDestination,
    ) {
        self.redirect_all(Destinations {
            info,
            warning,
            error,
            debug,
        });
    }

    /// [`redirect`](Self::redirect) taking a prepared [`Destinations`] set.
    pub fn redirect_all(&self, destinations: Destinations) {
        self.registry().redirect(destinations);
    }

    /// Returns the destination `channel` currently writes to.
    #[must_use]
    pub fn destination(&self, channel: Channel) -> SharedDestination {
        Arc::clone(self.registry().logger(channel).destination())
    }

    /// Renders `error` using the format of the level active right now.
    ///
    /// A [`LogLevelError`] is rendered through its own display so its
    /// backtrace appears in the detailed form.
    #[must_use]
    pub fn format_error(&self, error: &(dyn Error + 'static)) -> String {
        if let Some(wrapped) = error.downcast_ref::<LogLevelError>() {
            return wrapped.to_string();
        }
        self.shared.level.error_format().render(error)
    }

    /// Wraps `cause` so its display follows this facility's level at render time.
    #[must_use]
    pub fn wrap_error<E>(&self, cause: E) -> LogLevelError
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        LogLevelError::new(cause, self.level_state())
    }

    /// Flushes every distinct destination.
    pub fn flush(&self) -> io::Result<()> {
        self.registry().flush()
    }
}

impl Default for Facility {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facility")
            .field("level", &self.current_level())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Facility`].
///
/// The standard output destination backs the info and warning channels and
/// the debug channel in [`Level::Devel`]; the standard error destination
/// backs the error channel.
pub struct FacilityBuilder {
    level: Level,
    line_format: LineFormat,
    standard_output: SharedDestination,
    standard_error: SharedDestination,
}

impl Default for FacilityBuilder {
    fn default() -> Self {
        Self {
            level: Level::Normal,
            line_format: LineFormat::default(),
            standard_output: stdout(),
            standard_error: stderr(),
        }
    }
}

impl FacilityBuilder {
    /// Sets the initial level.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the line layout shared by all channels.
    #[must_use]
    pub fn line_format(mut self, line_format: LineFormat) -> Self {
        self.line_format = line_format;
        self
    }

    /// Applies the level and line format from `config`.
    #[must_use]
    pub fn config(self, config: &LogConfig) -> Self {
        self.level(config.level).line_format(config.line_format)
    }

    /// Replaces the standard output destination.
    #[must_use]
    pub fn standard_output(mut self, destination: SharedDestination) -> Self {
        self.standard_output = destination;
        self
    }

    /// Replaces the standard error destination.
    #[must_use]
    pub fn standard_error(mut self, destination: SharedDestination) -> Self {
        self.standard_error = destination;
        self
    }

    /// Builds the facility with each channel on its level-derived default.
    #[must_use]
    pub fn build(self) -> Facility {
        let debug = if self.level.debug_enabled() {
            Arc::clone(&self.standard_output)
        } else {
            discard()
        };
        let destinations = Destinations {
            info: Arc::clone(&self.standard_output),
            warning: Arc::clone(&self.standard_output),
            error: Arc::clone(&self.standard_error),
            debug,
        };
        Facility {
            shared: Arc::new(Shared {
                registry: Mutex::new(LoggerRegistry::new(self.line_format, destinations)),
                level: Arc::new(LevelState::new(self.level)),
                standard_output: self.standard_output,
                standard_error: self.standard_error,
            }),
        }
    }
}

impl fmt::Debug for FacilityBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacilityBuilder")
            .field("level", &self.level)
            .field("line_format", &self.line_format)
            .finish_non_exhaustive()
    }
}
