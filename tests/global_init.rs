//! Process-wide setup. Kept in its own test binary so no other test touches the global state.

use std::sync::Arc;

use sessionlog::{Level, LogBuffer, LogError, LogSettings, LoggerConfig, Sink};

#[tokio::test]
async fn test_global_setup_lifecycle() {
    assert!(matches!(
        sessionlog::master_logger(),
        Err(LogError::NotInitialized)
    ));
    assert!(matches!(
        sessionlog::session_logger("/early").await,
        Err(LogError::NotInitialized)
    ));

    let first = Arc::new(LogBuffer::default());
    let mut config = LoggerConfig::new();
    for level in Level::ALL {
        config
            .set_writer(level, [Sink::buffer(Arc::clone(&first))])
            .unwrap();
    }
    sessionlog::init_with_config(config).unwrap();

    let second = Arc::new(LogBuffer::default());
    let mut other = LoggerConfig::new();
    other
        .set_writer(Level::Info, [Sink::buffer(Arc::clone(&second))])
        .unwrap();
    assert!(matches!(
        sessionlog::init_with_config(other),
        Err(LogError::AlreadyInitialized)
    ));

    let temp_dir = tempfile::TempDir::new().unwrap();
    let settings = LogSettings::new().with_log_dir(temp_dir.path().join("logs"));
    assert!(matches!(
        sessionlog::init(&settings),
        Err(LogError::AlreadyInitialized)
    ));
    // The rejected setup must not have created a log file
    assert!(!temp_dir.path().join("logs").exists());

    let master = sessionlog::master_logger().unwrap();
    master.info("after failed re-init");

    let session = sessionlog::session_logger("/orders").await.unwrap();
    session.error("boom");

    assert!(second.is_empty());
    let lines = first.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("INFO: "));
    assert!(lines[0].ends_with("after failed re-init"));
    assert!(lines[1].starts_with(&format!("INFO{}: ", session.identity())));
    assert!(lines[2].starts_with(&format!(" ERR{}: ", session.identity())));
    assert!(lines[2].ends_with("boom"));
}
