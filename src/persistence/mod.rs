//! The `persistence` module keeps the last telegram the wearable received so
//! the face can show it again after a restart.
//!
//! It uses `sled` as an embedded key-value store. There is exactly one
//! record: every save overwrites it, and no history is kept.

pub mod sled_store;

pub use sled_store::{STORE_NAMESPACE, TelegramStore};

use crate::telegram::Telegram;
use crate::utils::error::StoreError;

#[cfg(test)]
mod tests;

/// Single-slot telegram storage shared by the listener (writer) and the
/// display (reader).
pub trait TelegramStorage: Send + Sync {
    /// Replaces the stored telegram.
    fn save(&self, telegram: &Telegram) -> Result<(), StoreError>;

    /// Returns the stored telegram, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<Telegram>, StoreError>;
}
