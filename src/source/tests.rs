use chrono::NaiveDate;

use super::{ForecastRow, MemoryWeatherSource, WeatherSource};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn row(id: i32) -> ForecastRow {
    ForecastRow {
        weather_condition_id: id,
        temperature_max: 25.0,
        temperature_min: 15.0,
    }
}

#[test]
fn test_empty_source_has_no_rows() {
    let source = MemoryWeatherSource::new();
    assert_eq!(source.forecast_for("94043", day(19)).unwrap(), None);
}

#[test]
fn test_rows_are_keyed_by_location_and_day() {
    let source = MemoryWeatherSource::new();
    source.upsert("94043", day(19), row(800)).unwrap();
    source.upsert("94043", day(20), row(500)).unwrap();
    source.upsert("10001", day(19), row(600)).unwrap();

    assert_eq!(source.forecast_for("94043", day(19)).unwrap(), Some(row(800)));
    assert_eq!(source.forecast_for("94043", day(20)).unwrap(), Some(row(500)));
    assert_eq!(source.forecast_for("10001", day(19)).unwrap(), Some(row(600)));
    assert_eq!(source.forecast_for("10001", day(20)).unwrap(), None);
}

#[test]
fn test_upsert_replaces_existing_row() {
    let source = MemoryWeatherSource::new();
    source.upsert("94043", day(19), row(800)).unwrap();
    source.upsert("94043", day(19), row(801)).unwrap();
    assert_eq!(source.forecast_for("94043", day(19)).unwrap(), Some(row(801)));
}
