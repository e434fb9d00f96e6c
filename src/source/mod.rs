//! The `source` module is the handheld-side view of the local forecast
//! database: given a preferred location and a day it yields at most one
//! forecast row.

pub mod memory;

pub use memory::MemoryWeatherSource;

use chrono::NaiveDate;

use crate::utils::error::SourceError;

#[cfg(test)]
mod tests;

/// The three columns the sync needs from a forecast row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub weather_condition_id: i32,
    pub temperature_max: f64,
    pub temperature_min: f64,
}

/// Queryable forecast storage.
pub trait WeatherSource: Send + Sync {
    /// Returns the row for `location` on `date`, `Ok(None)` when there is none.
    fn forecast_for(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<Option<ForecastRow>, SourceError>;
}
