#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` implements the leveled facility behind tracelog: four named
//! channels (info, warning, error, debug), a verbosity [`Level`] that decides
//! whether the debug channel reaches any output, and error rendering whose
//! verbosity follows the level in effect when the error is displayed.
//!
//! # Design
//!
//! A [`Facility`] owns a registry of four loggers behind one mutex. Each
//! logger pairs a fixed prefix with a replaceable
//! [`SharedDestination`](logging_sink::SharedDestination). Level transitions
//! reset the debug destination to the one the level implies, while
//! [`Facility::redirect`] swaps all four destinations in one step. The active
//! level lives in a shared [`LevelState`] so that a [`LogLevelError`] created
//! at one point can consult the level when it is rendered later.
//!
//! # Invariants
//!
//! - Channel prefixes never change after construction.
//! - In [`Level::Normal`] the debug channel writes to a discard sink unless
//!   an explicit redirect has happened since the last level transition.
//! - Rejected level names leave both the level and every destination as they
//!   were.
//! - No emit ever observes a partially applied redirect.
//!
//! # Errors
//!
//! Channel writes return the [`std::io::Error`] of the current destination
//! unchanged. Level parsing fails with a [`LogLevelError`] whose cause is an
//! [`InvalidLevelError`] naming the rejected value and the accepted names.
//!
//! # Examples
//!
//! ```
//! use logging::{Facility, Level};
//! use logging_sink::{LineFormat, MemoryBuffer, Timestamp};
//!
//! let out = MemoryBuffer::new();
//! let facility = Facility::builder()
//!     .standard_output(out.shared())
//!     .line_format(LineFormat::default().with_timestamp(Timestamp::None))
//!     .build();
//!
//! facility.info("listening").unwrap();
//! let error = facility.set_level("loud").unwrap_err();
//! assert!(error.invalid_level().is_some());
//! assert_eq!(facility.current_level(), Level::Normal);
//!
//! assert_eq!(out.contents(), "INFO: listening\n");
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for destinations and line layout.

mod channel;
mod config;
mod error;
mod facility;
mod format;
mod level;
mod registry;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use channel::Channel;
pub use config::LogConfig;
pub use error::{InvalidLevelError, LogLevelError};
pub use facility::{Facility, FacilityBuilder};
pub use format::ErrorFormat;
pub use level::{LEVEL_NAMES, Level, LevelState};
pub use registry::Destinations;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{ChannelLayer, default_filter, init_tracing, init_tracing_with_filter};
