//! sessionlog - session-scoped loggers for request handlers
//!
//! Every line a [`Logger`] writes carries its level, and for session loggers the endpoint and a
//! unique ID, so output from concurrent requests sharing one destination can be told apart:
//!
//! ```text
//! INFO@/users:k3P0x9aQ_b2Z: 2026/10/19 14:25:30 handlers.rs:42: looking up user 17
//!  ERR@/users:k3P0x9aQ_b2Z: 2026/10/19 14:25:30 handlers.rs:48: user 17 not found
//! ```
//!
//! Call [`init`] once at startup, then create a [`master_logger`] for process-level messages
//! and a [`session_logger`] per request. For several independent setups build a
//! [`LogContext`] per [`LoggerConfig`] instead.

pub mod config;
pub mod context;
pub mod error;
pub mod ids;
pub mod level;
pub mod logger;
pub mod sink;

pub use config::{LogSettings, LoggerConfig};
pub use context::{
    global, init, init_with_config, master_logger, must_init, session_logger, LogContext,
};
pub use error::{LogError, Result};
pub use ids::IdService;
pub use level::Level;
pub use logger::{Channel, Logger, MASTER_IDENTITY};
pub use sink::{LogBuffer, LogFileInfo, Sink, SinkKind};
