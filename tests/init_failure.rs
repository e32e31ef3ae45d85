//! A failed process-wide setup reports the filesystem error and can be retried.

use sessionlog::{LogError, LogSettings};

#[test]
fn test_init_failure_then_retry() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let blocked = LogSettings::new().with_log_dir(blocker.join("logs"));
    let err = sessionlog::init(&blocked).unwrap_err();
    assert!(matches!(err, LogError::CreateDir { .. }));

    assert!(matches!(
        sessionlog::master_logger(),
        Err(LogError::NotInitialized)
    ));

    let logs_dir = temp_dir.path().join("logs");
    let settings = LogSettings::new().with_log_dir(&logs_dir);
    let file_info = sessionlog::init(&settings).unwrap().unwrap();
    assert!(file_info.path.starts_with(&logs_dir));

    let master = sessionlog::master_logger().unwrap();
    master.warn("recovered");

    let contents = std::fs::read_to_string(&file_info.path).unwrap();
    assert!(contents.starts_with("WARN: "));
    assert!(contents.ends_with(": recovered\n"));
}
