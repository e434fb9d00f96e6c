//! The `codec` module turns a [`Telegram`](crate::telegram::Telegram) into the
//! flat key/value payload the sync channel replicates, and back.
//!
//! The payload format is shared by both devices, so the key names and the
//! logical path live here as well.

pub mod data_map;
pub mod wire;

pub use data_map::{DataMap, DataValue};
pub use wire::{
    KEY_CONDITION, KEY_SYNC_NONCE, KEY_TEMP_MAX, KEY_TEMP_MIN, KEY_TEMP_UNIT, PATH_WEATHER_DATA,
    decode, encode,
};
