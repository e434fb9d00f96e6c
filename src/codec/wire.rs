//! Telegram <-> payload mapping.
//!
//! Besides the four telegram fields every encoded payload carries a
//! `SYNC_NONCE` timestamp. It only exists so that two payloads with the same
//! telegram are still distinct items for transports that drop identical
//! writes; decoding never looks at it.

use chrono::Utc;

use super::data_map::{DataMap, DataValue};
use crate::telegram::{Telegram, WeatherUnit};
use crate::utils::error::DecodeError;

/// Logical path weather payloads are published under.
pub const PATH_WEATHER_DATA: &str = "/weatherdata";

pub const KEY_CONDITION: &str = "WEATHER_CONDITION";
pub const KEY_TEMP_MIN: &str = "WEATHER_TEMP_MIN";
pub const KEY_TEMP_MAX: &str = "WEATHER_TEMP_MAX";
pub const KEY_TEMP_UNIT: &str = "WEATHER_TEMP_UNIT";
pub const KEY_SYNC_NONCE: &str = "SYNC_NONCE";

/// Encodes `telegram`, stamping the payload with the current wall-clock time.
pub fn encode(telegram: &Telegram) -> DataMap {
    encode_at(telegram, Utc::now().timestamp_millis())
}

/// Encodes `telegram` with an explicit freshness stamp.
pub fn encode_at(telegram: &Telegram, nonce_millis: i64) -> DataMap {
    let mut map = DataMap::new();
    map.put_int(KEY_CONDITION, telegram.weather_condition_id());
    map.put_double(KEY_TEMP_MIN, telegram.temperature_min());
    map.put_double(KEY_TEMP_MAX, telegram.temperature_max());
    map.put_int(KEY_TEMP_UNIT, telegram.unit().code());
    map.put_long(KEY_SYNC_NONCE, nonce_millis);
    map
}

/// Decodes a payload. A missing or unknown unit falls back to Celsius; any
/// other missing or mistyped field rejects the whole payload.
pub fn decode(map: &DataMap) -> Result<Telegram, DecodeError> {
    let condition = read_int(map, KEY_CONDITION)?;
    let temp_min = read_double(map, KEY_TEMP_MIN)?;
    let temp_max = read_double(map, KEY_TEMP_MAX)?;
    let unit = match map.get(KEY_TEMP_UNIT) {
        Some(DataValue::Int(code)) => WeatherUnit::from_code(code),
        _ => WeatherUnit::default(),
    };

    Ok(Telegram::new(unit, condition, temp_max, temp_min))
}

fn read_int(map: &DataMap, key: &'static str) -> Result<i32, DecodeError> {
    match map.get(key) {
        Some(DataValue::Int(v)) => Ok(v),
        Some(_) => Err(DecodeError::WrongType {
            key,
            expected: "int",
        }),
        None => Err(DecodeError::MissingField(key)),
    }
}

fn read_double(map: &DataMap, key: &'static str) -> Result<f64, DecodeError> {
    match map.get(key) {
        Some(DataValue::Double(v)) => Ok(v),
        Some(_) => Err(DecodeError::WrongType {
            key,
            expected: "double",
        }),
        None => Err(DecodeError::MissingField(key)),
    }
}
