#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the output half of the tracelog channels: the
//! [`Destination`] abstraction every channel writes into, the concrete
//! destinations used by default (standard output, standard error, discard),
//! an in-memory [`MemoryBuffer`] for capturing output, and the [`LineWriter`]
//! that turns a message into one prefixed, timestamped line.
//!
//! # Design
//!
//! A destination is the capability "accept a line of bytes, possibly
//! failing". Channels hold destinations as [`SharedDestination`] trait
//! objects so several channels can share one sink and so a destination can be
//! swapped at runtime without the channel knowing its concrete type. The
//! [`LineWriter`] owns the fixed channel prefix together with a [`LineFormat`]
//! and renders the complete line before handing it to the destination in a
//! single call.
//!
//! # Invariants
//!
//! - Each call to [`LineWriter::write`] produces exactly one
//!   [`Destination::write_line`] call containing a newline-terminated line.
//! - [`Discard`] is the only destination reporting
//!   [`Destination::is_discard`].
//!
//! # Errors
//!
//! All operations surface [`std::io::Error`] values originating from the
//! underlying stream. Nothing is retried.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{LineFormat, LineWriter, MemoryBuffer, Timestamp};
//!
//! let buffer = MemoryBuffer::new();
//! let writer = LineWriter::new("INFO: ", LineFormat::default().with_timestamp(Timestamp::None));
//!
//! writer.write(&buffer, "ready").unwrap();
//! assert_eq!(buffer.contents(), "INFO: ready\n");
//! ```

mod destination;
mod line_writer;

pub use destination::{
    Destination, Discard, MemoryBuffer, SharedDestination, Stderr, Stdout, WriterDestination,
    discard, stderr, stdout,
};
pub use line_writer::{LineFormat, LineWriter, PrefixPlacement, Timestamp};
