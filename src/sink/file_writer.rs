//! Log file bootstrap
//!
//! Creates the log directory and a fresh file named after the time logging was set up. One new
//! file is created per setup; nothing here rotates or prunes old files.

use std::fs::{DirBuilder, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::Sink;
use crate::error::{LogError, Result};

/// Information about the current log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileInfo {
    /// Full path to the log file
    pub path: PathBuf,
}

/// Path of the log file for a setup started at `started`, e.g. `m10-d19-t142530.log`
pub fn create_log_file_path(logs_dir: &Path, started: DateTime<Utc>) -> PathBuf {
    logs_dir.join(format!("{}.log", started.format("m%m-d%d-t%H%M%S")))
}

/// Ensure `logs_dir` exists and create a new timestamped log file in it
///
/// Returns a sink writing to the file along with its location.
pub fn open_log_file(logs_dir: &Path) -> Result<(Sink, LogFileInfo)> {
    open_log_file_at(logs_dir, Utc::now())
}

fn open_log_file_at(logs_dir: &Path, started: DateTime<Utc>) -> Result<(Sink, LogFileInfo)> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o775);
    }
    builder
        .create(logs_dir)
        .map_err(|source| LogError::CreateDir {
            path: logs_dir.to_path_buf(),
            source,
        })?;

    let path = create_log_file_path(logs_dir, started);
    let file = File::create(&path).map_err(|source| LogError::CreateFile {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Created log file {}", path.display());

    Ok((Sink::from_writer(file), LogFileInfo { path }))
}
