//! Severity levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;
use crate::sink::Sink;

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    /// Every level, in index order
    pub const ALL: [Level; 3] = [Level::Info, Level::Warn, Level::Error];

    /// Ordinal index (0, 1, 2)
    pub fn index(self) -> usize {
        match self {
            Level::Info => 0,
            Level::Warn => 1,
            Level::Error => 2,
        }
    }

    /// Four-column tag that starts every line written at this level
    pub fn tag(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => " ERR",
        }
    }

    /// Lowercase name, as accepted by `FromStr` and serde
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// Built-in destination used when no writer is configured
    pub fn default_sink(self) -> Sink {
        match self {
            Level::Info | Level::Warn => Sink::stdout(),
            Level::Error => Sink::stderr(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<usize> for Level {
    type Error = LogError;

    fn try_from(index: usize) -> Result<Self, LogError> {
        Level::ALL
            .get(index)
            .copied()
            .ok_or(LogError::InvalidLevel(index))
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" | "err" => Ok(Level::Error),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            _ => Level::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tags_are_four_columns() {
        for level in Level::ALL {
            assert_eq!(level.tag().len(), 4);
        }
        assert_eq!(Level::Error.tag(), " ERR");
    }

    #[test]
    fn test_level_try_from_index() {
        assert_eq!(Level::try_from(0).unwrap(), Level::Info);
        assert_eq!(Level::try_from(2).unwrap(), Level::Error);
        assert!(matches!(
            Level::try_from(3),
            Err(LogError::InvalidLevel(3))
        ));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
        assert!("debug".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_from_tracing() {
        assert_eq!(Level::from(tracing::Level::DEBUG), Level::Info);
        assert_eq!(Level::from(tracing::Level::WARN), Level::Warn);
        assert_eq!(Level::from(tracing::Level::ERROR), Level::Error);
    }
}
