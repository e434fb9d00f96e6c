use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::{debug, warn};
use uuid::Uuid;

use super::SyncEvent;

pub type SubscriberId = String;

/// Receiver side of the bus.
pub trait UpdateSubscriber: Send + Sync {
    fn on_event(&self, event: SyncEvent);
}

/// Publish/subscribe bus for [`SyncEvent`]s.
///
/// Subscribers are held weakly and must unsubscribe before they are torn
/// down. An entry whose subscriber is already gone is dropped on the next
/// publish and reported.
#[derive(Default)]
pub struct UpdateNotifier {
    subscribers: Mutex<HashMap<SubscriberId, Weak<dyn UpdateSubscriber>>>,
}

impl UpdateNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `subscriber` and returns the id to unsubscribe with.
    pub fn subscribe<S>(&self, subscriber: &Arc<S>) -> SubscriberId
    where
        S: UpdateSubscriber + 'static,
    {
        let id = format!("subscriber-{}", Uuid::new_v4());
        let weak: Weak<dyn UpdateSubscriber> = Arc::<S>::downgrade(subscriber);
        self.lock().insert(id.clone(), weak);
        debug!("{id} subscribed");
        id
    }

    /// Removes a subscriber. Returns `false` if the id was not registered.
    pub fn unsubscribe(&self, id: &SubscriberId) -> bool {
        let removed = self.lock().remove(id).is_some();
        if removed {
            debug!("{id} unsubscribed");
        }
        removed
    }

    /// Delivers `event` once to every live subscriber and returns how many
    /// received it.
    ///
    /// Delivery happens after the registry lock is released, so subscribers
    /// may subscribe or unsubscribe from inside `on_event`.
    pub fn publish(&self, event: SyncEvent) -> usize {
        let live: Vec<Arc<dyn UpdateSubscriber>> = {
            let mut subscribers = self.lock();
            let mut live = Vec::with_capacity(subscribers.len());
            subscribers.retain(|id, weak| match weak.upgrade() {
                Some(subscriber) => {
                    live.push(subscriber);
                    true
                }
                None => {
                    warn!("{id} was dropped without unsubscribing");
                    false
                }
            });
            live
        };

        for subscriber in &live {
            subscriber.on_event(event);
        }
        live.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SubscriberId, Weak<dyn UpdateSubscriber>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for UpdateNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
