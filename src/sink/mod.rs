//! Output destinations
//!
//! A [`Sink`] is a cheaply clonable handle to somewhere lines can be written: the standard
//! streams, a file, an in-memory [`LogBuffer`], a discard sink for disabled levels, or a
//! fan-out that duplicates every write to several other sinks.

mod buffer;
mod file_writer;

pub use buffer::{LogBuffer, DEFAULT_CAPACITY};
pub use file_writer::{create_log_file_path, open_log_file, LogFileInfo};

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// What a [`Sink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Stdout,
    Stderr,
    /// Accepts and drops every write
    Discard,
    /// An arbitrary writer such as a file
    Writer,
    Buffer,
    FanOut,
}

enum Target {
    Stdout,
    Stderr,
    Discard,
    Writer(Mutex<Box<dyn Write + Send>>),
    Buffer(Arc<LogBuffer>),
    FanOut(Vec<Sink>),
}

/// Shared handle to an output destination
///
/// Each call to [`Sink::write_line`] hands the whole line to every underlying destination in a
/// single locked `write_all`, so concurrent writers never interleave within a line.
#[derive(Clone)]
pub struct Sink {
    target: Arc<Target>,
}

impl Sink {
    fn from_target(target: Target) -> Self {
        Self {
            target: Arc::new(target),
        }
    }

    /// The process's standard output
    pub fn stdout() -> Self {
        Self::from_target(Target::Stdout)
    }

    /// The process's standard error
    pub fn stderr() -> Self {
        Self::from_target(Target::Stderr)
    }

    /// A sink that accepts and drops all writes
    pub fn discard() -> Self {
        Self::from_target(Target::Discard)
    }

    /// Wrap any writer, typically an open log file
    pub fn from_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_target(Target::Writer(Mutex::new(Box::new(writer))))
    }

    /// Record lines into a shared [`LogBuffer`]
    pub fn buffer(buffer: Arc<LogBuffer>) -> Self {
        Self::from_target(Target::Buffer(buffer))
    }

    /// Combine sinks so every write is duplicated to all of them
    ///
    /// A single sink is returned unchanged and an empty list yields a discard sink.
    pub fn fan_out<I>(sinks: I) -> Self
    where
        I: IntoIterator<Item = Sink>,
    {
        let mut sinks: Vec<Sink> = sinks.into_iter().collect();
        match sinks.len() {
            0 => Self::discard(),
            1 => sinks.remove(0),
            _ => Self::from_target(Target::FanOut(sinks)),
        }
    }

    /// What this sink writes to
    pub fn kind(&self) -> SinkKind {
        match *self.target {
            Target::Stdout => SinkKind::Stdout,
            Target::Stderr => SinkKind::Stderr,
            Target::Discard => SinkKind::Discard,
            Target::Writer(_) => SinkKind::Writer,
            Target::Buffer(_) => SinkKind::Buffer,
            Target::FanOut(_) => SinkKind::FanOut,
        }
    }

    /// True when both handles point at the same destination
    pub fn ptr_eq(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.target, &other.target)
    }

    /// Write one complete line to every destination behind this sink
    ///
    /// For fan-outs every destination is attempted; the first error is returned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        self.write_bytes(line.as_bytes())
    }

    fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        match &*self.target {
            Target::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            Target::Stderr => io::stderr().lock().write_all(bytes),
            Target::Discard => Ok(()),
            Target::Writer(writer) => {
                let mut writer = writer
                    .lock()
                    .map_err(|_| io::Error::new(io::ErrorKind::Other, "sink writer poisoned"))?;
                writer.write_all(bytes)?;
                writer.flush()
            }
            Target::Buffer(buffer) => {
                buffer.push(&String::from_utf8_lossy(bytes));
                Ok(())
            }
            Target::FanOut(sinks) => {
                let mut first_err = None;
                for sink in sinks {
                    if let Err(e) = sink.write_bytes(bytes) {
                        first_err.get_or_insert(e);
                    }
                }
                first_err.map_or(Ok(()), Err)
            }
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.target {
            Target::FanOut(sinks) => f.debug_tuple("FanOut").field(sinks).finish(),
            _ => write!(f, "{:?}", self.kind()),
        }
    }
}

/// Each `write` call is forwarded whole, so a caller that formats a full line before writing
/// (as `tracing-subscriber` does) keeps the no-interleaving guarantee.
impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
