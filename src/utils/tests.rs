use super::error::{DecodeError, StoreError, SyncError, TransportError};
use super::logging;

#[test]
fn logging_init_accepts_levels() {
    // Should not panic
    logging::init("info");
    logging::init("debug");
    logging::init("warn");
}

#[test]
fn test_parse_level_falls_back_to_info() {
    assert_eq!(logging::parse_level("WARNING"), tracing::Level::WARN);
    assert_eq!(logging::parse_level(" trace "), tracing::Level::TRACE);
    assert_eq!(logging::parse_level("loud"), tracing::Level::INFO);
}

#[test]
fn test_error_messages_name_the_field() {
    let err = DecodeError::MissingField("WEATHER_CONDITION");
    assert_eq!(
        err.to_string(),
        "payload is missing required field `WEATHER_CONDITION`"
    );

    let err = StoreError::Corrupt("WEATHER_TEMP_MAX");
    assert!(err.to_string().contains("WEATHER_TEMP_MAX"));
}

#[test]
fn test_sync_error_wraps_transport_error() {
    let err: SyncError = TransportError::NotConnected.into();
    assert!(matches!(
        err,
        SyncError::Transport(TransportError::NotConnected)
    ));
    assert_eq!(err.to_string(), "transport session is not connected");
}
