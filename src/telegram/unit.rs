use serde::{Deserialize, Serialize};

/// Temperature unit carried by a telegram.
///
/// On the wire and in storage the unit is an integer code. Any code other
/// than the two known ones decodes as Celsius rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl WeatherUnit {
    pub const CELSIUS_CODE: i32 = 1;
    pub const FAHRENHEIT_CODE: i32 = 2;

    pub fn code(self) -> i32 {
        match self {
            WeatherUnit::Celsius => Self::CELSIUS_CODE,
            WeatherUnit::Fahrenheit => Self::FAHRENHEIT_CODE,
        }
    }

    /// Decodes a unit code, defaulting to Celsius for anything unrecognized.
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::FAHRENHEIT_CODE => WeatherUnit::Fahrenheit,
            _ => WeatherUnit::Celsius,
        }
    }

    /// Suffix appended to temperatures when they are shown on the face.
    pub fn suffix(self) -> &'static str {
        match self {
            WeatherUnit::Celsius => "°C",
            WeatherUnit::Fahrenheit => "°F",
        }
    }
}
