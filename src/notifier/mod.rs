//! The `notifier` module is the in-process bus that tells the display a new
//! telegram has been stored.
//!
//! The bus is created by whoever wires the application together and handed
//! to both the listener and the display; nothing here is global. It only
//! keeps weak references to its subscribers, so dropping a subscriber is
//! never blocked by the bus. Events are volatile: nothing is replayed after a
//! restart, the display reads the store for that.

pub mod bus;
pub mod channel;

pub use bus::{SubscriberId, UpdateNotifier, UpdateSubscriber};
pub use channel::ChannelSubscriber;

/// Events published on the bus. They carry no payload; subscribers read the
/// store for the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    WeatherDataUpdated,
}

#[cfg(test)]
mod tests;
