//! The `error` module defines the error types used within `weathersync`.
//!
//! Each layer owns one enum; `SyncError` gathers the ones the handheld-side
//! sender can hit so callers can propagate with `?`.

use thiserror::Error;

/// A wire payload could not be turned back into a telegram.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("payload is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("payload field `{key}` is not a {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
}

/// The durable store could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sled::Error),

    #[error("stored field `{0}` is corrupt")]
    Corrupt(&'static str),
}

/// The local forecast source could not be queried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceError {
    #[error("weather source unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the sync channel between the paired devices.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport session is not connected")]
    NotConnected,

    #[error("transport session closed")]
    Closed,

    #[error("failed to bind sync endpoint: {0}")]
    Bind(#[from] std::io::Error),

    #[error("failed to connect: {0}")]
    Connect(#[from] tungstenite::Error),

    #[error("malformed frame: {0}")]
    Frame(#[from] serde_json::Error),
}

/// Everything a single check-and-send pass can fail with.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
