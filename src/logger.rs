//! Loggers and their per-level channels
//!
//! Every line has the shape `<TAG><PREFIX>: <date> <time> <file>:<line>: <message>`, where the
//! prefix is empty for the master logger and `@<endpoint>:<id>` for session loggers.

use std::fmt;
use std::io;
use std::panic::Location;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::config::LoggerConfig;
use crate::level::Level;
use crate::sink::Sink;

/// Identity of a logger without a session
pub const MASTER_IDENTITY: &str = "MASTER";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Output for one level of one logger: a fixed sink plus the line prefix
#[derive(Debug, Clone)]
pub struct Channel {
    level: Level,
    prefix: String,
    sink: Sink,
}

impl Channel {
    fn new(level: Level, prefix: &str, sink: Sink) -> Self {
        Self {
            level,
            prefix: format!("{}{}: ", level.tag(), prefix),
            sink,
        }
    }

    /// Level this channel writes at
    pub fn level(&self) -> Level {
        self.level
    }

    /// Text written before the timestamp, e.g. `WARN@/users:3fK9a0bQ1zXy: `
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Destination resolved when the logger was built
    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// Write a line tagged with the caller's source location, ignoring write errors
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        let _ = self.write_line(Some(Location::caller()), &message.to_string());
    }

    /// Format and write one line, reporting write errors
    pub fn write_line(&self, location: Option<&Location<'_>>, message: &str) -> io::Result<()> {
        let line = self.format_line(Local::now(), location, message);
        self.sink.write_line(&line)
    }

    fn format_line(
        &self,
        now: DateTime<Local>,
        location: Option<&Location<'_>>,
        message: &str,
    ) -> String {
        let mut line = format!("{}{} ", self.prefix, now.format(TIMESTAMP_FORMAT));
        if let Some(location) = location {
            let file = Path::new(location.file())
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_else(|| location.file().into());
            line.push_str(&format!("{}:{}: ", file, location.line()));
        }
        line.push_str(message);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}

/// A logger bound to one destination per level
///
/// The channels are resolved from a [`LoggerConfig`] when the logger is built and never change
/// afterwards.
#[derive(Debug, Clone)]
pub struct Logger {
    identity: String,
    info: Channel,
    warn: Channel,
    error: Channel,
}

impl Logger {
    fn with_identity(config: &LoggerConfig, identity: String, prefix: &str) -> Self {
        Self {
            identity,
            info: Channel::new(Level::Info, prefix, config.writer(Level::Info)),
            warn: Channel::new(Level::Warn, prefix, config.writer(Level::Warn)),
            error: Channel::new(Level::Error, prefix, config.writer(Level::Error)),
        }
    }

    /// Logger with no per-request identity
    pub fn master(config: &LoggerConfig) -> Self {
        Self::with_identity(config, MASTER_IDENTITY.to_string(), "")
    }

    /// Logger for one session of `endpoint`, identified by `id`
    ///
    /// Writes a blank Info line first so the session's transcript stands apart in a shared sink.
    pub fn session(config: &LoggerConfig, endpoint: &str, id: &str) -> Self {
        let identity = format!("@{}:{}", endpoint, id);
        let logger = Self::with_identity(config, identity.clone(), &identity);
        let _ = logger.info.write_line(None, "");
        logger
    }

    /// `MASTER` or `@<endpoint>:<id>`
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Whether this logger has no session identity
    pub fn is_master(&self) -> bool {
        self.identity == MASTER_IDENTITY
    }

    /// Channel for `level`
    pub fn channel(&self, level: Level) -> &Channel {
        match level {
            Level::Info => &self.info,
            Level::Warn => &self.warn,
            Level::Error => &self.error,
        }
    }

    /// Info channel
    pub fn i(&self) -> &Channel {
        &self.info
    }

    /// Warn channel
    pub fn w(&self) -> &Channel {
        &self.warn
    }

    /// Error channel
    pub fn e(&self) -> &Channel {
        &self.error
    }

    /// Write `message` at Info level
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.info.print(message);
    }

    /// Write `message` at Warn level
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.warn.print(message);
    }

    /// Write `message` at Error level
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.error.print(message);
    }
}
