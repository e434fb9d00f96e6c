//! Telegram store backed by `sled`
//!
//! The record lives in its own tree, one key per field. Presence of the
//! condition key marks that a telegram has been stored. Reads and writes go
//! through sled transactions so a reader never sees half of an update.

use std::path::Path;

use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::{Db, IVec, Tree};
use tracing::debug;

use super::TelegramStorage;
use crate::codec::{KEY_CONDITION, KEY_TEMP_MAX, KEY_TEMP_MIN, KEY_TEMP_UNIT};
use crate::telegram::{Telegram, WeatherUnit};
use crate::utils::error::StoreError;

/// Name of the sled tree holding the watch-face state.
pub const STORE_NAMESPACE: &str = "sunshinewatchfacestate";

type Fields = (Option<IVec>, Option<IVec>, Option<IVec>, Option<IVec>);

#[derive(Clone)]
pub struct TelegramStore {
    tree: Tree,
}

impl TelegramStore {
    /// Open or create a sled database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Self::with_db(db)
    }

    /// Use the state tree of an already opened database.
    pub fn with_db(db: Db) -> Result<Self, StoreError> {
        let tree = db.open_tree(STORE_NAMESPACE)?;
        Ok(Self { tree })
    }

    /// Drops the stored telegram, returning the store to its never-saved state.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.tree.clear()?;
        self.tree.flush()?;
        Ok(())
    }

    fn read_fields(&self) -> Result<Fields, StoreError> {
        self.tree
            .transaction(|tx| {
                Ok::<_, ConflictableTransactionError<StoreError>>((
                    tx.get(KEY_CONDITION)?,
                    tx.get(KEY_TEMP_MAX)?,
                    tx.get(KEY_TEMP_MIN)?,
                    tx.get(KEY_TEMP_UNIT)?,
                ))
            })
            .map_err(flatten)
    }
}

impl TelegramStorage for TelegramStore {
    fn save(&self, telegram: &Telegram) -> Result<(), StoreError> {
        let condition = telegram.weather_condition_id().to_be_bytes();
        let max = telegram.temperature_max().to_be_bytes();
        let min = telegram.temperature_min().to_be_bytes();
        let unit = telegram.unit().code().to_be_bytes();

        self.tree
            .transaction(|tx| {
                tx.insert(KEY_CONDITION, &condition[..])?;
                tx.insert(KEY_TEMP_MAX, &max[..])?;
                tx.insert(KEY_TEMP_MIN, &min[..])?;
                tx.insert(KEY_TEMP_UNIT, &unit[..])?;
                Ok::<_, ConflictableTransactionError<StoreError>>(())
            })
            .map_err(flatten)?;
        self.tree.flush()?;

        debug!(
            condition = telegram.weather_condition_id(),
            "persisted weather telegram"
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<Telegram>, StoreError> {
        let (condition, max, min, unit) = self.read_fields()?;

        let Some(condition) = condition else {
            return Ok(None);
        };

        let condition = i32::from_be_bytes(fixed(&condition, KEY_CONDITION)?);
        let max = f64::from_be_bytes(fixed(&required(max, KEY_TEMP_MAX)?, KEY_TEMP_MAX)?);
        let min = f64::from_be_bytes(fixed(&required(min, KEY_TEMP_MIN)?, KEY_TEMP_MIN)?);
        let unit = match unit {
            Some(raw) => fixed(&raw, KEY_TEMP_UNIT)
                .map(|bytes| WeatherUnit::from_code(i32::from_be_bytes(bytes)))
                .unwrap_or_default(),
            None => WeatherUnit::default(),
        };

        Ok(Some(Telegram::new(unit, condition, max, min)))
    }
}

fn flatten(err: TransactionError<StoreError>) -> StoreError {
    match err {
        TransactionError::Abort(e) => e,
        TransactionError::Storage(e) => StoreError::Unavailable(e),
    }
}

fn required(value: Option<IVec>, key: &'static str) -> Result<IVec, StoreError> {
    value.ok_or(StoreError::Corrupt(key))
}

fn fixed<const N: usize>(raw: &IVec, key: &'static str) -> Result<[u8; N], StoreError> {
    <[u8; N]>::try_from(&raw[..]).map_err(|_| StoreError::Corrupt(key))
}

impl std::fmt::Debug for TelegramStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramStore")
            .field("tree", &STORE_NAMESPACE)
            .finish()
    }
}

#[cfg(test)]
impl TelegramStore {
    pub(crate) fn raw_tree(&self) -> &Tree {
        &self.tree
    }
}
