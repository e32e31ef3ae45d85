//! Error type shared by every fallible operation in the crate

use std::convert::Infallible;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by configuration, bootstrap and ID service operations
#[derive(Debug, Error)]
pub enum LogError {
    /// A raw level index outside `0..=2` was passed to a mutating config call
    #[error("log level {0} is out of range (expected 0, 1 or 2)")]
    InvalidLevel(usize),

    /// A level name that is not one of info, warn or error
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    /// The log directory could not be created
    #[error("failed to create log directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log file could not be created inside the log directory
    #[error("failed to create log file {}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings file could not be read
    #[error("failed to read logging settings from {}", path.display())]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse logging settings")]
    ParseSettings(#[from] toml::de::Error),

    /// Returned by `init` when the process-wide context already exists
    #[error("logging was already initialized")]
    AlreadyInitialized,

    /// Returned by the global convenience constructors before `init`
    #[error("logging has not been initialized")]
    NotInitialized,

    /// The OS refused to spawn the generator thread
    #[error("failed to start the ID service thread")]
    IdServiceStart(#[source] io::Error),

    #[error("the ID service has stopped")]
    IdServiceStopped,

    #[error("timed out waiting for a session ID")]
    IdTimeout,
}

impl From<Infallible> for LogError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LogError>;
