//! The `transport` module is the sync channel between the handheld and the
//! wearable.
//!
//! It defines the data items and change events both sides exchange, the
//! connection state every session moves through, and the push seam the
//! handheld-side sender writes to. Two channels implement it: an in-process
//! loopback and a WebSocket link.

pub mod connection;
pub mod loopback;
pub mod message;
pub mod websocket;

pub use connection::{Connection, ConnectionState, SessionId};
pub use loopback::LoopbackTransport;
pub use message::{DataEvent, DataEventKind, DataItem, SyncFrame};
pub use websocket::{WebSocketTransport, serve, start_sync_server};

use crate::utils::error::TransportError;


/// Push side of the sync channel.
///
/// `put_data_item` is fire-and-forget: it returns once the item is queued,
/// delivery to the other device is not awaited.
pub trait DataTransport: Send + Sync {
    fn state(&self) -> ConnectionState;

    fn put_data_item(&self, item: DataItem) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }
}
