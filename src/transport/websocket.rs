//! WebSocket sync link
//!
//! The wearable runs [`start_sync_server`]; each connection carries JSON
//! [`SyncFrame`]s whose event batches are handed to the
//! [`TransportListener`]. The handheld holds a [`WebSocketTransport`]: after
//! `connect`, pushes are queued on an unbounded channel that a writer task
//! drains into the socket, so `put_data_item` never waits on the network.

use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_tungstenite::{accept_async, connect_async};
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use super::DataTransport;
use super::connection::{Connection, ConnectionState};
use super::message::{DataEvent, DataItem, SyncFrame};
use crate::listener::TransportListener;
use crate::utils::error::TransportError;

/// Binds `addr` and serves sync connections until the listener socket fails.
pub async fn start_sync_server(
    addr: &str,
    listener: Arc<TransportListener>,
) -> Result<(), TransportError> {
    let socket = TcpListener::bind(addr).await?;
    info!("Sync server listening on ws://{addr}");
    serve(socket, listener).await;
    Ok(())
}

/// Accepts connections on an already bound socket.
pub async fn serve(socket: TcpListener, listener: Arc<TransportListener>) {
    while let Ok((stream, peer)) = socket.accept().await {
        let listener = listener.clone();
        let peer_id = format!("peer-{}", Uuid::new_v4());

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    error!("WebSocket handshake error from {peer}: {e}");
                    return;
                }
            };
            info!("{peer_id} connected from {peer}");

            let (_ws_sender, mut ws_receiver) = ws_stream.split();

            while let Some(Ok(msg)) = ws_receiver.next().await {
                if !msg.is_text() {
                    continue;
                }
                let Ok(text) = msg.to_text() else {
                    continue;
                };
                match serde_json::from_str::<SyncFrame>(text) {
                    Ok(SyncFrame::DataChanged { events }) => {
                        deliver(listener.clone(), &peer_id, events).await;
                    }
                    Err(err) => {
                        warn!("Invalid sync frame from {peer_id}: {err} | {text}");
                    }
                }
            }

            info!("{peer_id} disconnected");
        });
    }
}

// The listener writes and flushes sled, so it runs off the async workers.
// Batches from one peer are still handled in arrival order.
async fn deliver(listener: Arc<TransportListener>, peer_id: &str, events: Vec<DataEvent>) {
    let outcome =
        tokio::task::spawn_blocking(move || listener.on_data_changed(events)).await;
    match outcome {
        Ok(Ok(report)) => debug!(
            "{peer_id}: stored {} ignored {} failed {}",
            report.stored, report.ignored, report.failed
        ),
        Ok(Err(e)) => error!("{peer_id}: batch aborted: {e}"),
        Err(e) => error!("{peer_id}: batch handler panicked: {e}"),
    }
}

/// Handheld end of the WebSocket link.
#[derive(Debug, Default)]
pub struct WebSocketTransport {
    connection: Arc<Connection>,
    sender: Mutex<Option<UnboundedSender<WsMessage>>>,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl WebSocketTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session to the wearable at `url` (e.g. `ws://127.0.0.1:8686`).
    pub async fn connect(&self, url: &str) -> Result<(), TransportError> {
        let Some(session) = self.connection.begin_connect() else {
            return match self.connection.state() {
                ConnectionState::Connected => Ok(()),
                _ => Err(TransportError::NotConnected),
            };
        };

        let ws_stream = match connect_async(url).await {
            Ok((ws, _response)) => ws,
            Err(e) => {
                self.connection.failed();
                return Err(e.into());
            }
        };
        let (mut ws_sender, mut ws_receiver) = ws_stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
        *self.sender_slot() = Some(tx);
        self.connection.connected();
        info!("Connected to wearable at {url}");

        // Forward queued pushes into the socket
        let connection = self.connection.clone();
        let writer = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = ws_sender.send(msg).await {
                    error!("Failed to push to wearable: {e}");
                    break;
                }
            }
            let _ = ws_sender.close().await;
            connection.end_session(session);
            debug!("Push loop for session {session} closed");
        });
        *lock(&self.writer) = Some(writer);

        // Watch for the wearable going away
        let connection = self.connection.clone();
        tokio::spawn(async move {
            while let Some(Ok(_)) = ws_receiver.next().await {}
            if connection.end_session(session) {
                info!("Wearable link closed");
            }
        });

        Ok(())
    }

    /// Ends the session. Items already queued are still flushed in the
    /// background.
    pub fn disconnect(&self) {
        self.sender_slot().take();
        self.connection.disconnect();
    }

    /// Ends the session and waits until queued items have been written.
    pub async fn close(&self) {
        self.disconnect();
        let writer = lock(&self.writer).take();
        if let Some(writer) = writer {
            if let Err(e) = writer.await {
                error!("Push loop ended abnormally: {e}");
            }
        }
    }

    fn sender_slot(&self) -> MutexGuard<'_, Option<UnboundedSender<WsMessage>>> {
        lock(&self.sender)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl DataTransport for WebSocketTransport {
    fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    fn put_data_item(&self, item: DataItem) -> Result<(), TransportError> {
        if !self.connection.is_connected() {
            return Err(TransportError::NotConnected);
        }
        let frame = SyncFrame::DataChanged {
            events: vec![DataEvent::changed(item)],
        };
        let text = serde_json::to_string(&frame)?;

        let slot = self.sender_slot();
        let sender = slot.as_ref().ok_or(TransportError::NotConnected)?;
        sender.send(WsMessage::text(text)).map_err(|_| {
            self.connection.disconnect();
            TransportError::Closed
        })
    }
}
