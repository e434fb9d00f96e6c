//! # weathersync
//!
//! `weathersync` replicates a compact weather snapshot from a handheld to a
//! paired wearable and keeps it on the wearable for the watch face to show.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `telegram`: The weather snapshot value and its temperature unit.
//! - `codec`: Encodes telegrams into the key/value payload the sync channel carries.
//! - `source`: The handheld's forecast lookup.
//! - `sender`: Pushes a telegram to the wearable only when it changed.
//! - `transport`: Data items, change events, connection state and the sync links.
//! - `listener`: Receives change batches on the wearable, stores and announces them.
//! - `persistence`: Durable single-record telegram store (using `sled`).
//! - `notifier`: In-process bus announcing that new weather data was stored.
//! - `display`: The weather state the watch face renders from.
//! - `config`: Handles loading and managing configuration.
//! - `utils`: Shared error types and logging setup.

pub mod codec;
pub mod config;
pub mod display;
pub mod listener;
pub mod notifier;
pub mod persistence;
pub mod sender;
pub mod source;
pub mod telegram;
pub mod transport;
pub mod utils;

#[cfg(test)]
mod tests;
