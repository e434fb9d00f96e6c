use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use super::{ForecastRow, WeatherSource};
use crate::utils::error::SourceError;

/// Forecast rows held in memory, keyed by location and day.
#[derive(Debug, Default)]
pub struct MemoryWeatherSource {
    rows: RwLock<HashMap<(String, NaiveDate), ForecastRow>>,
}

impl MemoryWeatherSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the row for `location` on `date`.
    pub fn upsert(
        &self,
        location: &str,
        date: NaiveDate,
        row: ForecastRow,
    ) -> Result<(), SourceError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        rows.insert((location.to_string(), date), row);
        Ok(())
    }
}

impl WeatherSource for MemoryWeatherSource {
    fn forecast_for(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<Option<ForecastRow>, SourceError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        Ok(rows.get(&(location.to_string(), date)).copied())
    }
}
