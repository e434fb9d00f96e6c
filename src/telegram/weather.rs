use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::unit::WeatherUnit;

/// Separator between the min and max temperatures in `temperature_line`.
const TEMPERATURE_GAP: &str = "       ";

/// One weather snapshot as replicated from the handheld to the wearable.
///
/// Telegrams are immutable values: a newer snapshot replaces an older one,
/// it never edits it. Equality is exact on every field, including the
/// temperatures, because it only decides whether a push is redundant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Telegram {
    weather_condition_id: i32,
    temperature_max: f64,
    temperature_min: f64,
    unit: WeatherUnit,
}

impl Telegram {
    pub fn new(
        unit: WeatherUnit,
        weather_condition_id: i32,
        temperature_max: f64,
        temperature_min: f64,
    ) -> Self {
        Self {
            weather_condition_id,
            temperature_max,
            temperature_min,
            unit,
        }
    }

    pub fn weather_condition_id(&self) -> i32 {
        self.weather_condition_id
    }

    pub fn temperature_max(&self) -> f64 {
        self.temperature_max
    }

    pub fn temperature_min(&self) -> f64 {
        self.temperature_min
    }

    pub fn unit(&self) -> WeatherUnit {
        self.unit
    }

    /// Text shown under the clock, e.g. `15°C       25°C`.
    ///
    /// Temperatures are truncated toward zero, not rounded.
    pub fn temperature_line(&self) -> String {
        let suffix = self.unit.suffix();
        format!(
            "{}{suffix}{TEMPERATURE_GAP}{}{suffix}",
            self.temperature_min.trunc() as i64,
            self.temperature_max.trunc() as i64,
        )
    }
}

impl PartialEq for Telegram {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
            && self.weather_condition_id == other.weather_condition_id
            && self.temperature_max == other.temperature_max
            && self.temperature_min == other.temperature_min
    }
}

// Must agree with `eq`: 0.0 and -0.0 compare equal, so they hash alike.
fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}

impl Hash for Telegram {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.hash(state);
        self.weather_condition_id.hash(state);
        canonical_bits(self.temperature_max).hash(state);
        canonical_bits(self.temperature_min).hash(state);
    }
}
