//! Logger configuration
//!
//! [`LoggerConfig`] decides, per level, where lines go and whether they are written at all.
//! [`LogSettings`] is the serializable description of a setup, suitable for embedding in an
//! application's own TOML config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::{LogError, Result};
use crate::level::Level;
use crate::sink::{open_log_file, LogFileInfo, Sink};

/// Per-level destinations and on/off switches
///
/// The default value writes Info and Warn to stdout, Error to stderr, with every level enabled.
/// Loggers copy the resolved sinks when they are built, so changing a config afterwards does
/// not affect loggers that already exist.
#[derive(Debug, Clone, Default)]
pub struct LoggerConfig {
    disabled: [bool; 3],
    writers: [Option<Sink>; 3],
}

impl LoggerConfig {
    /// Create a config with default writers and every level enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a level as disabled. Fails if a raw level index is out of range.
    pub fn disable<L>(&mut self, level: L) -> Result<&mut Self>
    where
        L: TryInto<Level>,
        LogError: From<L::Error>,
    {
        let level: Level = level.try_into()?;
        self.disabled[level.index()] = true;
        Ok(self)
    }

    /// Combine `sinks` into one fan-out and use it as the destination for `level`
    pub fn set_writer<L, I>(&mut self, level: L, sinks: I) -> Result<&mut Self>
    where
        L: TryInto<Level>,
        LogError: From<L::Error>,
        I: IntoIterator<Item = Sink>,
    {
        let level: Level = level.try_into()?;
        self.writers[level.index()] = Some(Sink::fan_out(sinks));
        Ok(self)
    }

    /// Whether writes at `level` reach a destination
    pub fn is_enabled(&self, level: Level) -> bool {
        !self.disabled[level.index()]
    }

    /// Effective destination for `level`
    ///
    /// Never fails: an out-of-range level falls back to the Info default (stdout), a disabled
    /// level yields a discard sink, and an unset level yields its built-in default.
    pub fn writer<L>(&self, level: L) -> Sink
    where
        L: TryInto<Level>,
    {
        let level: Level = match level.try_into() {
            Ok(level) => level,
            Err(_) => return Level::Info.default_sink(),
        };
        if self.disabled[level.index()] {
            return Sink::discard();
        }
        match &self.writers[level.index()] {
            Some(sink) => sink.clone(),
            None => level.default_sink(),
        }
    }

    /// Build a config from settings, creating the log file if a directory is given
    ///
    /// With a log directory, Info and Warn go to the file and stdout, Error to the file and
    /// stderr.
    pub fn from_settings(settings: &LogSettings) -> Result<(Self, Option<LogFileInfo>)> {
        let mut config = Self::new();
        for level in &settings.disabled {
            config.disable(*level)?;
        }

        let Some(logs_dir) = settings.log_dir() else {
            return Ok((config, None));
        };

        let (file, info) = open_log_file(logs_dir)?;
        config
            .set_writer(Level::Info, [file.clone(), Sink::stdout()])?
            .set_writer(Level::Warn, [file.clone(), Sink::stdout()])?
            .set_writer(Level::Error, [file, Sink::stderr()])?;

        Ok((config, Some(info)))
    }
}

/// Routes `tracing` events to the sink configured for their level, so an application's own
/// `tracing` output can share destinations with its session loggers.
impl<'a> MakeWriter<'a> for LoggerConfig {
    type Writer = Sink;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer(Level::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.writer(Level::from(*meta.level()))
    }
}

/// Serializable logging setup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Directory for the log file. When unset or empty, no file is created and output goes to
    /// stdout and stderr only.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Levels whose output is discarded
    #[serde(default)]
    pub disabled: Vec<Level>,
}

impl LogSettings {
    /// Settings with no log file and every level enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a log file into `log_dir`
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    /// Discard output at `level`
    pub fn with_disabled(mut self, level: Level) -> Self {
        if !self.disabled.contains(&level) {
            self.disabled.push(level);
        }
        self
    }

    /// The configured log directory, ignoring an empty path
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LogError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
