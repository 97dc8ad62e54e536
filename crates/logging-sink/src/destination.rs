//! crates/logging-sink/src/destination.rs
//! Destination sinks that channels write rendered lines into.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// A writable target for rendered log lines.
///
/// Implementations receive one complete line per call, including its
/// terminating newline. They must be safe to share between threads because a
/// single destination may back several channels at once.
pub trait Destination: Send + Sync {
    /// Writes one rendered line.
    fn write_line(&self, line: &[u8]) -> io::Result<()>;

    /// Flushes any buffering in the underlying stream.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// Reports whether the destination drops everything it receives.
    fn is_discard(&self) -> bool {
        false
    }
}

/// Reference-counted destination shared between channels.
pub type SharedDestination = Arc<dyn Destination>;

impl<D> Destination for Arc<D>
where
    D: Destination + ?Sized,
{
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }

    fn is_discard(&self) -> bool {
        (**self).is_discard()
    }
}

/// Process standard output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stdout;

impl Destination for Stdout {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(line)
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Process standard error.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stderr;

impl Destination for Stderr {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        io::stderr().lock().write_all(line)
    }

    fn flush(&self) -> io::Result<()> {
        io::stderr().lock().flush()
    }
}

/// Destination that accepts and drops all input.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl Destination for Discard {
    fn write_line(&self, _line: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn is_discard(&self) -> bool {
        true
    }
}

/// Returns a shared handle to process standard output.
#[must_use]
pub fn stdout() -> SharedDestination {
    Arc::new(Stdout)
}

/// Returns a shared handle to process standard error.
#[must_use]
pub fn stderr() -> SharedDestination {
    Arc::new(Stderr)
}

/// Returns a shared discard destination.
#[must_use]
pub fn discard() -> SharedDestination {
    Arc::new(Discard)
}

/// In-memory destination that records every line it receives.
///
/// Clones share the same buffer, so a test can keep one handle for
/// inspection while another is installed on a channel.
///
/// # Examples
///
/// ```
/// use logging_sink::{Destination, MemoryBuffer};
///
/// let buffer = MemoryBuffer::new();
/// let installed = buffer.clone();
/// installed.write_line(b"first\n")?;
/// installed.write_line(b"second\n")?;
///
/// assert_eq!(buffer.lines(), vec!["first", "second"]);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct MemoryBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Returns a copy of the raw bytes written so far.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the buffer decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns each recorded line without its terminator.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Drains the buffer and returns its previous contents.
    pub fn take(&self) -> String {
        let drained = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&drained).into_owned()
    }

    /// Returns `true` when nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns this buffer as a [`SharedDestination`] sharing the same storage.
    #[must_use]
    pub fn shared(&self) -> SharedDestination {
        Arc::new(self.clone())
    }
}

impl Destination for MemoryBuffer {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        self.lock().extend_from_slice(line);
        Ok(())
    }
}

impl fmt::Debug for MemoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBuffer")
            .field("len", &self.lock().len())
            .finish()
    }
}

/// Adapts any [`Write`] implementor, such as a log file, into a destination.
///
/// The writer sits behind a mutex so lines from concurrent channels never
/// interleave inside the stream.
pub struct WriterDestination<W> {
    writer: Mutex<W>,
}

impl<W> WriterDestination<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the destination and returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<W> Destination for WriterDestination<W>
where
    W: Write + Send,
{
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        self.lock().write_all(line)
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<W> fmt::Debug for WriterDestination<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterDestination").finish_non_exhaustive()
    }
}
