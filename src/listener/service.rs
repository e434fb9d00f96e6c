use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use super::identity::{CallingIdentity, ElevatedScope, ProcessIdentity};
use crate::codec::{self, PATH_WEATHER_DATA};
use crate::notifier::{SyncEvent, UpdateNotifier};
use crate::persistence::TelegramStorage;
use crate::telegram::Telegram;
use crate::transport::message::{DataEvent, DataEventKind};
use crate::utils::error::StoreError;

/// Per-batch outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Weather items decoded, stored and announced.
    pub stored: usize,
    /// Deletions and items under other paths.
    pub ignored: usize,
    /// Weather items whose payload could not be decoded.
    pub failed: usize,
}

/// Consumes change batches from the sync channel.
///
/// The listener is the only writer of the telegram store. Batches are
/// processed one at a time; a second batch arriving while one is in progress
/// waits for it.
pub struct TransportListener {
    storage: Arc<dyn TelegramStorage>,
    notifier: Arc<UpdateNotifier>,
    identity: Arc<dyn CallingIdentity>,
    in_flight: Mutex<()>,
}

impl TransportListener {
    pub fn new(storage: Arc<dyn TelegramStorage>, notifier: Arc<UpdateNotifier>) -> Self {
        Self::with_identity(storage, notifier, Arc::new(ProcessIdentity))
    }

    pub fn with_identity(
        storage: Arc<dyn TelegramStorage>,
        notifier: Arc<UpdateNotifier>,
        identity: Arc<dyn CallingIdentity>,
    ) -> Self {
        Self {
            storage,
            notifier,
            identity,
            in_flight: Mutex::new(()),
        }
    }

    /// Handles one delivered batch.
    ///
    /// A payload that fails to decode is logged and skipped; the rest of the
    /// batch is still processed. A store failure aborts the batch and is
    /// returned, since later events could not be stored either.
    pub fn on_data_changed(&self, events: Vec<DataEvent>) -> Result<BatchReport, StoreError> {
        let _serial = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _scope = ElevatedScope::enter(self.identity.as_ref());

        info!("received {} data event(s)", events.len());
        let mut report = BatchReport::default();

        for event in events {
            if event.kind != DataEventKind::Changed {
                debug!(path = %event.item.path, "ignoring deleted item");
                report.ignored += 1;
                continue;
            }
            if event.item.path != PATH_WEATHER_DATA {
                debug!(path = %event.item.path, "ignoring item under unrelated path");
                report.ignored += 1;
                continue;
            }

            match codec::decode(&event.item.data) {
                Ok(telegram) => {
                    self.persist_and_notify(&telegram)?;
                    report.stored += 1;
                }
                Err(e) => {
                    warn!("Dropping malformed weather payload: {e}");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    // Store first: subscribers re-read the store when notified.
    fn persist_and_notify(&self, telegram: &Telegram) -> Result<(), StoreError> {
        self.storage.save(telegram)?;
        info!(
            condition = telegram.weather_condition_id(),
            "got an update, notifying watch face"
        );
        self.notifier.publish(SyncEvent::WeatherDataUpdated);
        Ok(())
    }
}

impl std::fmt::Debug for TransportListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportListener")
            .field("notifier", &self.notifier)
            .finish()
    }
}
