//! Logger factory and process-wide setup
//!
//! A [`LogContext`] pairs a [`LoggerConfig`] with an [`IdService`] and builds loggers from them.
//! Applications that only need one configuration can call [`init`] once at startup and then use
//! [`master_logger`] and [`session_logger`] anywhere.

use std::sync::OnceLock;

use tracing::info;

use crate::config::{LogSettings, LoggerConfig};
use crate::error::{LogError, Result};
use crate::ids::IdService;
use crate::logger::Logger;
use crate::sink::LogFileInfo;

static GLOBAL: OnceLock<LogContext> = OnceLock::new();

/// Builds master and session loggers from a fixed configuration
#[derive(Debug, Clone)]
pub struct LogContext {
    config: LoggerConfig,
    ids: IdService,
}

impl LogContext {
    /// Context using the process-wide ID service, starting it if needed
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Ok(Self::with_id_service(config, IdService::global()?.clone()))
    }

    /// Context drawing session IDs from `ids`
    pub fn with_id_service(config: LoggerConfig, ids: IdService) -> Self {
        Self { config, ids }
    }

    /// Configuration every logger from this context is built from
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Source of session IDs
    pub fn id_service(&self) -> &IdService {
        &self.ids
    }

    /// Logger with no session identity; writes nothing on construction
    pub fn master_logger(&self) -> Logger {
        Logger::master(&self.config)
    }

    /// Session logger for `endpoint`, waiting for the next ID from the service
    pub async fn session_logger(&self, endpoint: &str) -> Result<Logger> {
        let id = self.ids.next_id().await?;
        Ok(Logger::session(&self.config, endpoint, &id))
    }

    /// Blocking variant of [`session_logger`](Self::session_logger); must not be called from
    /// async code.
    pub fn session_logger_blocking(&self, endpoint: &str) -> Result<Logger> {
        let id = self.ids.next_id_blocking()?;
        Ok(Logger::session(&self.config, endpoint, &id))
    }
}

/// Set up process-wide logging from settings
///
/// Creates the log directory and file when `settings` names one. Can only succeed once per
/// process; later calls return [`LogError::AlreadyInitialized`] and leave the first setup alone.
pub fn init(settings: &LogSettings) -> Result<Option<LogFileInfo>> {
    if GLOBAL.get().is_some() {
        return Err(LogError::AlreadyInitialized);
    }

    let (config, file_info) = LoggerConfig::from_settings(settings)?;
    init_with_config(config)?;

    if let Some(ref file_info) = file_info {
        info!("Logging to: {}", file_info.path.display());
    }
    Ok(file_info)
}

/// Set up process-wide logging with an explicit configuration
pub fn init_with_config(config: LoggerConfig) -> Result<()> {
    let context = LogContext::new(config)?;
    GLOBAL
        .set(context)
        .map_err(|_| LogError::AlreadyInitialized)
}

/// [`init`] that panics on failure
pub fn must_init(settings: &LogSettings) -> Option<LogFileInfo> {
    match init(settings) {
        Ok(file_info) => file_info,
        Err(e) => panic!("logger initialization failed: {}", e),
    }
}

/// The process-wide context set up by [`init`]
pub fn global() -> Result<&'static LogContext> {
    GLOBAL.get().ok_or(LogError::NotInitialized)
}

/// Master logger from the process-wide context
pub fn master_logger() -> Result<Logger> {
    Ok(global()?.master_logger())
}

/// Session logger from the process-wide context
pub async fn session_logger(endpoint: &str) -> Result<Logger> {
    global()?.session_logger(endpoint).await
}
