use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::connection::{Connection, ConnectionState};
use super::message::{DataEvent, DataItem};
use super::DataTransport;
use crate::utils::error::TransportError;

/// In-process sync channel.
///
/// Every pushed item comes out of the paired receiver as a one-event batch,
/// the same shape the WebSocket link delivers.
#[derive(Debug)]
pub struct LoopbackTransport {
    connection: Connection,
    sender: UnboundedSender<Vec<DataEvent>>,
}

impl LoopbackTransport {
    /// Creates a disconnected transport and the receiving end of its batches.
    pub fn pair() -> (Self, UnboundedReceiver<Vec<DataEvent>>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let transport = Self {
            connection: Connection::new(),
            sender,
        };
        (transport, receiver)
    }

    /// Creates a transport that is already connected.
    pub fn connected_pair() -> (Self, UnboundedReceiver<Vec<DataEvent>>) {
        let (transport, receiver) = Self::pair();
        transport.connect();
        (transport, receiver)
    }

    pub fn connect(&self) {
        if self.connection.begin_connect().is_some() {
            self.connection.connected();
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

impl DataTransport for LoopbackTransport {
    fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    fn put_data_item(&self, item: DataItem) -> Result<(), TransportError> {
        if !self.connection.is_connected() {
            return Err(TransportError::NotConnected);
        }
        self.sender
            .send(vec![DataEvent::changed(item)])
            .map_err(|_| {
                self.connection.disconnect();
                TransportError::Closed
            })
    }
}
