use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::codec::{self, PATH_WEATHER_DATA};
use crate::source::WeatherSource;
use crate::telegram::{Telegram, WeatherUnit};
use crate::transport::{DataItem, DataTransport};
use crate::utils::error::SyncError;

/// What a single update pass did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SendOutcome {
    /// The telegram differed from the last one and was pushed.
    Sent(Telegram),
    /// Same telegram as last time; nothing pushed.
    Unchanged,
    /// No forecast row for the location and day yet.
    NoData,
    /// The transport has no session; nothing was attempted.
    NotConnected,
}

/// Change detector that pushes weather telegrams to the wearable.
///
/// It does not schedule itself; some external trigger calls
/// [`do_update`](Self::do_update). Calls on one instance are serialized, and
/// the remembered telegram is only replaced after a push was issued.
pub struct WearUpdater {
    source: Arc<dyn WeatherSource>,
    transport: Arc<dyn DataTransport>,
    location: String,
    last_sent: Mutex<Option<Telegram>>,
}

impl WearUpdater {
    /// Unit every telegram from this side is expressed in.
    pub const UNIT: WeatherUnit = WeatherUnit::Celsius;

    pub fn new(
        source: Arc<dyn WeatherSource>,
        transport: Arc<dyn DataTransport>,
        location: &str,
    ) -> Self {
        Self {
            source,
            transport,
            location: location.to_string(),
            last_sent: Mutex::new(None),
        }
    }

    /// Runs an update for the local current day.
    pub fn do_update(&self) -> Result<SendOutcome, SyncError> {
        self.do_update_for(Local::now().date_naive())
    }

    /// Runs an update for the forecast of `date`.
    pub fn do_update_for(&self, date: NaiveDate) -> Result<SendOutcome, SyncError> {
        let mut last_sent = self
            .last_sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        info!("Updating wear");
        if !self.transport.is_connected() {
            info!("No sync connection, skipping update");
            return Ok(SendOutcome::NotConnected);
        }

        debug!(location = %self.location, %date, "querying weather data for wear");
        let Some(row) = self.source.forecast_for(&self.location, date)? else {
            debug!("no forecast row yet");
            return Ok(SendOutcome::NoData);
        };

        let telegram = Telegram::new(
            Self::UNIT,
            row.weather_condition_id,
            row.temperature_max,
            row.temperature_min,
        );

        if last_sent.as_ref() == Some(&telegram) {
            info!("no wear update needed");
            return Ok(SendOutcome::Unchanged);
        }

        info!(
            condition = telegram.weather_condition_id(),
            "sending update to wear"
        );
        let item = DataItem::new(PATH_WEATHER_DATA, codec::encode(&telegram));
        self.transport.put_data_item(item)?;
        *last_sent = Some(telegram);

        Ok(SendOutcome::Sent(telegram))
    }

    /// The telegram most recently pushed, if any.
    pub fn last_sent(&self) -> Option<Telegram> {
        *self
            .last_sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for WearUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WearUpdater")
            .field("location", &self.location)
            .field("last_sent", &self.last_sent())
            .finish()
    }
}
