//! crates/logging/src/registry.rs
//! The four channel loggers and their current destinations.

use std::fmt;
use std::io;
use std::sync::Arc;

use logging_sink::{LineFormat, LineWriter, SharedDestination};

use crate::channel::Channel;

/// One channel: a fixed line writer plus a replaceable destination.
pub(crate) struct Logger {
    writer: LineWriter,
    destination: SharedDestination,
}

impl Logger {
    fn new(channel: Channel, format: LineFormat, destination: SharedDestination) -> Self {
        Self {
            writer: LineWriter::new(channel.prefix(), format),
            destination,
        }
    }

    pub(crate) const fn writer(&self) -> &LineWriter {
        &self.writer
    }

    pub(crate) fn destination(&self) -> &SharedDestination {
        &self.destination
    }

    pub(crate) fn write_line(&self, line: &[u8]) -> io::Result<()> {
        self.destination.write_line(line)
    }
}

/// Destinations for the four channels, in [`Channel::ALL`] order.
///
/// Any entries may refer to the same destination object.
#[derive(Clone)]
pub struct Destinations {
    /// Destination for [`Channel::Info`].
    pub info: SharedDestination,
    /// Destination for [`Channel::Warning`].
    pub warning: SharedDestination,
    /// Destination for [`Channel::Error`].
    pub error: SharedDestination,
    /// Destination for [`Channel::Debug`].
    pub debug: SharedDestination,
}

impl Destinations {
    /// Routes every channel to `destination`.
    #[must_use]
    pub fn all(destination: &SharedDestination) -> Self {
        Self {
            info: Arc::clone(destination),
            warning: Arc::clone(destination),
            error: Arc::clone(destination),
            debug: Arc::clone(destination),
        }
    }

    fn into_array(self) -> [SharedDestination; 4] {
        [self.info, self.warning, self.error, self.debug]
    }
}

impl fmt::Debug for Destinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destinations").finish_non_exhaustive()
    }
}

/// The four loggers. Prefixes are fixed at construction; only destinations change.
pub(crate) struct LoggerRegistry {
    loggers: [Logger; 4],
}

impl LoggerRegistry {
    pub(crate) fn new(format: LineFormat, destinations: Destinations) -> Self {
        let [info, warning, error, debug] = destinations.into_array();
        Self {
            loggers: [
                Logger::new(Channel::Info, format, info),
                Logger::new(Channel::Warning, format, warning),
                Logger::new(Channel::Error, format, error),
                Logger::new(Channel::Debug, format, debug),
            ],
        }
    }

    pub(crate) const fn logger(&self, channel: Channel) -> &Logger {
        &self.loggers[channel.index()]
    }

    pub(crate) fn set_destination(&mut self, channel: Channel, destination: SharedDestination) {
        self.loggers[channel.index()].destination = destination;
    }

    /// Replaces every destination in one step.
    pub(crate) fn redirect(&mut self, destinations: Destinations) {
        for (logger, destination) in self.loggers.iter_mut().zip(destinations.into_array()) {
            logger.destination = destination;
        }
    }

    /// Flushes each distinct destination once.
    pub(crate) fn flush(&self) -> io::Result<()> {
        let mut flushed: Vec<&SharedDestination> = Vec::with_capacity(self.loggers.len());
        for logger in &self.loggers {
            let destination = &logger.destination;
            if flushed.iter().any(|seen| Arc::ptr_eq(seen, destination)) {
                continue;
            }
            destination.flush()?;
            flushed.push(destination);
        }
        Ok(())
    }
}
