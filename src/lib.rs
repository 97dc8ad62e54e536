#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! src/lib.rs
//!
//! # Overview
//!
//! `tracelog` is a process-wide leveled logging facility. It offers four
//! channels (info, warning, error, debug), each writing prefixed,
//! timestamped lines, and two verbosity levels. In [`Level::Normal`] the
//! debug channel is muted and errors render as their top-level description;
//! in [`Level::Devel`] debug lines reach standard output and errors render
//! with their full cause chain.
//!
//! # Design
//!
//! The free functions in this crate operate on one lazily created global
//! [`Facility`]. Hosts that want a different starting configuration call
//! [`install`] before the first log call. Everything else, including
//! channel routing, level transitions and error wrapping, lives in the
//! `logging` crate, with destinations and line layout in `logging-sink`.
//!
//! # Invariants
//!
//! - The global facility is created exactly once and never replaced.
//! - Every free function is safe to call concurrently from any thread.
//!
//! # Errors
//!
//! Channel writes return [`std::io::Error`] from the active destination.
//! [`set_level`] returns a [`LogLevelError`] for names outside
//! [`LEVEL_NAMES`] and changes nothing in that case.
//!
//! # Examples
//!
//! ```
//! use tracelog::{Destinations, LineFormat, MemoryBuffer, Timestamp};
//!
//! let out = MemoryBuffer::new();
//! tracelog::install(
//!     tracelog::Facility::builder()
//!         .line_format(LineFormat::default().with_timestamp(Timestamp::None))
//!         .build(),
//! )
//! .expect("first install");
//! tracelog::redirect_all(Destinations::all(&out.shared()));
//!
//! tracelog::info!("starting worker {}", 3)?;
//! tracelog::debug!("hidden until DEVEL")?;
//! tracelog::set_level("DEVEL").expect("valid level");
//! tracelog::debug!("now visible")?;
//!
//! assert_eq!(out.lines(), vec!["INFO: starting worker 3"]);
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! The last debug line goes to standard output because every level
//! transition resets the debug channel to the destination the new level
//! implies.

use std::error::Error;
use std::io;
use std::sync::OnceLock;

pub use logging::{
    Channel, Destinations, ErrorFormat, Facility, FacilityBuilder, InvalidLevelError, LEVEL_NAMES,
    Level, LevelState, LogConfig, LogLevelError,
};
#[cfg(feature = "tracing")]
pub use logging::{ChannelLayer, default_filter, init_tracing, init_tracing_with_filter};
pub use logging_sink::{
    Destination, LineFormat, MemoryBuffer, PrefixPlacement, SharedDestination, Timestamp,
    WriterDestination, discard, stderr, stdout,
};

static FACILITY: OnceLock<Facility> = OnceLock::new();

/// Returns the global facility, creating it with default settings on first use.
pub fn facility() -> &'static Facility {
    FACILITY.get_or_init(Facility::new)
}

/// Installs `facility` as the global one.
///
/// Fails, handing `facility` back, once the global has been installed or
/// created by an earlier log call.
pub fn install(facility: Facility) -> Result<(), Facility> {
    FACILITY.set(facility)
}

/// Installs a global facility built from `config`.
///
/// Returns `false` when the global already exists.
pub fn init(config: &LogConfig) -> bool {
    install(Facility::from_config(config)).is_ok()
}

/// Writes `message` on the info channel.
pub fn log_info(message: &str) -> io::Result<()> {
    facility().info(message)
}

/// Writes `message` on the warning channel.
pub fn log_warning(message: &str) -> io::Result<()> {
    facility().warning(message)
}

/// Writes `message` on the error channel.
pub fn log_error(message: &str) -> io::Result<()> {
    facility().error(message)
}

/// Writes `message` on the debug channel; discarded in [`Level::Normal`]
/// unless the debug channel was redirected.
pub fn log_debug(message: &str) -> io::Result<()> {
    facility().debug(message)
}

/// Validates `value` and switches the global level.
pub fn set_level(value: &str) -> Result<(), LogLevelError> {
    facility().set_level(value)
}

/// Switches the global level without parsing.
pub fn apply_level(level: Level) {
    facility().apply_level(level);
}

/// Returns the global level.
pub fn current_level() -> Level {
    facility().current_level()
}

/// Renders `error` for the global level in effect right now.
pub fn format_error(error: &(dyn Error + 'static)) -> String {
    facility().format_error(error)
}

/// Wraps `cause` so it renders for the global level at display time.
pub fn wrap_error<E>(cause: E) -> LogLevelError
where
    E: Into<Box<dyn Error + Send + Sync + 'static>>,
{
    facility().wrap_error(cause)
}

/// Replaces the four global channel destinations in one step.
pub fn redirect(
    info: SharedDestination,
    warning: SharedDestination,
    error: SharedDestination,
    debug: SharedDestination,
) {
    facility().redirect(info, warning, error, debug);
}

/// [`redirect`] taking a prepared [`Destinations`] set.
pub fn redirect_all(destinations: Destinations) {
    facility().redirect_all(destinations);
}

/// Flushes every global destination.
pub fn flush() -> io::Result<()> {
    facility().flush()
}

/// Formats its arguments and writes them on the global info channel.
///
/// Evaluates to the `io::Result<()>` of the write.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log_info(&::std::format!($($arg)*))
    };
}

/// Formats its arguments and writes them on the global warning channel.
#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {
        $crate::log_warning(&::std::format!($($arg)*))
    };
}

/// Formats its arguments and writes them on the global error channel.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log_error(&::std::format!($($arg)*))
    };
}

/// Formats its arguments and writes them on the global debug channel.
///
/// The arguments are formatted even when the line is discarded.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log_debug(&::std::format!($($arg)*))
    };
}
