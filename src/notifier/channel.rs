use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use super::SyncEvent;
use super::bus::UpdateSubscriber;

/// Forwards bus events into a tokio channel so async code can await them.
#[derive(Debug)]
pub struct ChannelSubscriber {
    /// Channel to send events to the consuming task.
    pub sender: UnboundedSender<SyncEvent>,
}

impl ChannelSubscriber {
    pub fn new(sender: UnboundedSender<SyncEvent>) -> Self {
        Self { sender }
    }

    /// Creates a subscriber together with the receiving end of its channel.
    pub fn channel() -> (Arc<Self>, UnboundedReceiver<SyncEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self::new(tx)), rx)
    }
}

impl UpdateSubscriber for ChannelSubscriber {
    fn on_event(&self, event: SyncEvent) {
        if let Err(e) = self.sender.send(event) {
            warn!("Failed to forward {:?}: receiver closed", e.0);
        }
    }
}
