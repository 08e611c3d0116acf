use orc_logger::{Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn second_init_reports_existing_subscriber() {
    let first = Logger::builder().name("orc-first").init().unwrap();
    assert!(!first.writes_files());

    let err = Logger::builder().name("orc-second").init().unwrap_err();
    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
