use std::sync::{Arc, RwLock};

use tracing::{error, info};

use crate::notifier::{SyncEvent, UpdateSubscriber};
use crate::persistence::TelegramStorage;
use crate::telegram::Telegram;

/// Weather state of the face.
///
/// Loaded from the store when created and reloaded whenever the bus reports
/// new weather data. `None` means no telegram has ever been received and the
/// face shows its "no data" state.
pub struct WeatherPanel {
    storage: Arc<dyn TelegramStorage>,
    current: RwLock<Option<Telegram>>,
}

impl WeatherPanel {
    pub fn new(storage: Arc<dyn TelegramStorage>) -> Self {
        let panel = Self {
            storage,
            current: RwLock::new(None),
        };
        panel.refresh();
        panel
    }

    /// Re-reads the store. If the read fails the previous value is kept.
    pub fn refresh(&self) {
        match self.storage.load() {
            Ok(telegram) => {
                *self
                    .current
                    .write()
                    .unwrap_or_else(|poisoned| poisoned.into_inner()) = telegram;
            }
            Err(e) => error!("Failed to load weather state: {e}"),
        }
    }

    pub fn current(&self) -> Option<Telegram> {
        *self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn temperature_line(&self) -> Option<String> {
        self.current().map(|t| t.temperature_line())
    }
}

impl UpdateSubscriber for WeatherPanel {
    fn on_event(&self, event: SyncEvent) {
        match event {
            SyncEvent::WeatherDataUpdated => {
                self.refresh();
                info!("weather panel now {:?}", self.temperature_line());
            }
        }
    }
}

impl std::fmt::Debug for WeatherPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherPanel")
            .field("current", &self.current())
            .finish()
    }
}
