//! crates/logging-sink/src/line_writer.rs
//! Prefixed, timestamped line rendering.

use std::io;

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::destination::Destination;

const SECONDS_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month]/[day] [hour]:[minute]:[second]");

const MICROSECONDS_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month]/[day] [hour]:[minute]:[second].[subsecond digits:6]");

/// Timestamp precision written at the start of each line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Timestamp {
    /// No timestamp.
    None,
    /// `YYYY/MM/DD HH:MM:SS`.
    Seconds,
    /// `YYYY/MM/DD HH:MM:SS.uuuuuu`.
    #[default]
    Microseconds,
}

/// Where the channel prefix is placed relative to the timestamp.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrefixPlacement {
    /// `INFO: 2024/01/02 03:04:05.000006 message`
    #[default]
    LineStart,
    /// `2024/01/02 03:04:05.000006 INFO: message`
    BeforeMessage,
}

/// Layout options shared by every channel of a facility.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineFormat {
    /// Timestamp precision.
    pub timestamp: Timestamp,
    /// Render timestamps in UTC instead of the local offset.
    pub utc: bool,
    /// Prefix placement.
    pub prefix: PrefixPlacement,
}

impl LineFormat {
    /// Returns a copy using `timestamp`.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns a copy that renders timestamps in UTC when `utc` is set.
    #[must_use]
    pub const fn with_utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }

    /// Returns a copy using `prefix`.
    #[must_use]
    pub const fn with_prefix_placement(mut self, prefix: PrefixPlacement) -> Self {
        self.prefix = prefix;
        self
    }

    fn now(self) -> OffsetDateTime {
        if self.utc {
            OffsetDateTime::now_utc()
        } else {
            // The local offset is unavailable on some platforms once threads exist.
            OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
        }
    }
}

/// Renders messages as single lines carrying a fixed prefix and a timestamp.
///
/// The prefix is set at construction and never changes; the destination is
/// supplied per call so the owner can retarget output freely.
///
/// # Examples
///
/// ```
/// use logging_sink::{LineFormat, LineWriter, PrefixPlacement, Timestamp};
/// use time::macros::datetime;
///
/// let writer = LineWriter::new(
///     "WARNING: ",
///     LineFormat::default().with_prefix_placement(PrefixPlacement::BeforeMessage),
/// );
/// let line = writer.render_at("disk almost full", datetime!(2024-03-05 07:08:09.000010 UTC))?;
/// assert_eq!(line, b"2024/03/05 07:08:09.000010 WARNING: disk almost full\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct LineWriter {
    prefix: &'static str,
    format: LineFormat,
}

impl LineWriter {
    /// Creates a writer for `prefix` using `format`.
    #[must_use]
    pub const fn new(prefix: &'static str, format: LineFormat) -> Self {
        Self { prefix, format }
    }

    /// Returns the fixed prefix.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Returns the layout options.
    #[must_use]
    pub const fn format(&self) -> LineFormat {
        self.format
    }

    /// Renders `message` stamped with the current time.
    pub fn render(&self, message: &str) -> io::Result<Vec<u8>> {
        let now = match self.format.timestamp {
            Timestamp::None => None,
            Timestamp::Seconds | Timestamp::Microseconds => Some(self.format.now()),
        };
        self.render_line(message, now)
    }

    /// Renders `message` stamped with `at` instead of the current time.
    pub fn render_at(&self, message: &str, at: OffsetDateTime) -> io::Result<Vec<u8>> {
        self.render_line(message, Some(at))
    }

    fn render_line(&self, message: &str, at: Option<OffsetDateTime>) -> io::Result<Vec<u8>> {
        let mut line = Vec::with_capacity(self.prefix.len() + message.len() + 28);

        if self.format.prefix == PrefixPlacement::LineStart {
            line.extend_from_slice(self.prefix.as_bytes());
        }

        let description = match self.format.timestamp {
            Timestamp::None => None,
            Timestamp::Seconds => Some(SECONDS_FORMAT),
            Timestamp::Microseconds => Some(MICROSECONDS_FORMAT),
        };
        if let (Some(description), Some(at)) = (description, at) {
            at.format_into(&mut line, description)
                .map_err(io::Error::other)?;
            line.push(b' ');
        }

        if self.format.prefix == PrefixPlacement::BeforeMessage {
            line.extend_from_slice(self.prefix.as_bytes());
        }

        line.extend_from_slice(message.as_bytes());
        if !message.ends_with('\n') {
            line.push(b'\n');
        }
        Ok(line)
    }

    /// Renders `message` and writes it to `destination` as one line.
    pub fn write(&self, destination: &dyn Destination, message: &str) -> io::Result<()> {
        let line = self.render(message)?;
        destination.write_line(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBuffer;
    use time::macros::datetime;

    const AT: OffsetDateTime = datetime!(2009-01-23 01:23:23.123123 UTC);

    #[test]
    fn prefix_precedes_timestamp_by_default() {
        let writer = LineWriter::new("INFO: ", LineFormat::default());
        let line = writer.render_at("hello", AT).expect("render");
        assert_eq!(line, b"INFO: 2009/01/23 01:23:23.123123 hello\n".to_vec());
    }

    #[test]
    fn seconds_precision_drops_fraction() {
        let format = LineFormat::default().with_timestamp(Timestamp::Seconds);
        let writer = LineWriter::new("ERROR: ", format);
        let line = writer.render_at("boom", AT).expect("render");
        assert_eq!(line, b"ERROR: 2009/01/23 01:23:23 boom\n".to_vec());
    }

    #[test]
    fn prefix_can_sit_before_message() {
        let format = LineFormat::default()
            .with_timestamp(Timestamp::Seconds)
            .with_prefix_placement(PrefixPlacement::BeforeMessage);
        let writer = LineWriter::new("DEBUG: ", format);
        let line = writer.render_at("x", AT).expect("render");
        assert_eq!(line, b"2009/01/23 01:23:23 DEBUG: x\n".to_vec());
    }

    #[test]
    fn timestamp_none_renders_prefix_and_message_only() {
        let writer = LineWriter::new(
            "WARNING: ",
            LineFormat::default().with_timestamp(Timestamp::None),
        );
        let line = writer.render("careful").expect("render");
        assert_eq!(line, b"WARNING: careful\n".to_vec());
    }

    #[test]
    fn existing_newline_is_not_doubled() {
        let writer = LineWriter::new("INFO: ", LineFormat::default().with_timestamp(Timestamp::None));
        let line = writer.render("done\n").expect("render");
        assert_eq!(line, b"INFO: done\n".to_vec());
    }

    #[test]
    fn write_emits_exactly_one_line() {
        let buffer = MemoryBuffer::new();
        let writer = LineWriter::new("INFO: ", LineFormat::default().with_utc(true));
        writer.write(&buffer, "first").expect("write");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("INFO: "));
        assert!(lines[0].ends_with(" first"));
    }
}
