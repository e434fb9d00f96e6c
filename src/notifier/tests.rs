use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ChannelSubscriber, SyncEvent, UpdateNotifier, UpdateSubscriber};

#[derive(Default)]
struct CountingSubscriber {
    seen: AtomicUsize,
}

impl UpdateSubscriber for CountingSubscriber {
    fn on_event(&self, _event: SyncEvent) {
        self.seen.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_notifier_new_is_empty() {
    let notifier = UpdateNotifier::new();
    assert_eq!(notifier.subscriber_count(), 0);
    assert_eq!(notifier.publish(SyncEvent::WeatherDataUpdated), 0);
}

#[test]
fn test_publish_reaches_every_subscriber_once() {
    let notifier = UpdateNotifier::new();
    let a = Arc::new(CountingSubscriber::default());
    let b = Arc::new(CountingSubscriber::default());
    notifier.subscribe(&a);
    notifier.subscribe(&b);

    assert_eq!(notifier.publish(SyncEvent::WeatherDataUpdated), 2);

    assert_eq!(a.seen.load(Ordering::SeqCst), 1);
    assert_eq!(b.seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let notifier = UpdateNotifier::new();
    let a = Arc::new(CountingSubscriber::default());
    let id = notifier.subscribe(&a);

    assert!(notifier.unsubscribe(&id));
    assert!(!notifier.unsubscribe(&id));
    notifier.publish(SyncEvent::WeatherDataUpdated);

    assert_eq!(a.seen.load(Ordering::SeqCst), 0);
}

#[test]
fn test_notifier_does_not_keep_subscribers_alive() {
    let notifier = UpdateNotifier::new();
    let a = Arc::new(CountingSubscriber::default());
    notifier.subscribe(&a);
    assert_eq!(Arc::strong_count(&a), 1);

    drop(a);
    assert_eq!(notifier.publish(SyncEvent::WeatherDataUpdated), 0);
    assert_eq!(notifier.subscriber_count(), 0);
}

struct SelfRemoving {
    notifier: Arc<UpdateNotifier>,
    id: std::sync::Mutex<Option<String>>,
    seen: AtomicUsize,
}

impl UpdateSubscriber for SelfRemoving {
    fn on_event(&self, _event: SyncEvent) {
        self.seen.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = self.id.lock().unwrap().take() {
            self.notifier.unsubscribe(&id);
        }
    }
}

#[test]
fn test_subscriber_may_unsubscribe_during_delivery() {
    let notifier = Arc::new(UpdateNotifier::new());
    let sub = Arc::new(SelfRemoving {
        notifier: notifier.clone(),
        id: std::sync::Mutex::new(None),
        seen: AtomicUsize::new(0),
    });
    let id = notifier.subscribe(&sub);
    *sub.id.lock().unwrap() = Some(id);

    notifier.publish(SyncEvent::WeatherDataUpdated);
    notifier.publish(SyncEvent::WeatherDataUpdated);

    assert_eq!(sub.seen.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.subscriber_count(), 0);
}

#[test]
fn test_channel_subscriber_forwards_events() {
    let notifier = UpdateNotifier::new();
    let (sub, mut rx) = ChannelSubscriber::channel();
    notifier.subscribe(&sub);

    notifier.publish(SyncEvent::WeatherDataUpdated);

    assert_eq!(rx.try_recv().unwrap(), SyncEvent::WeatherDataUpdated);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_channel_subscriber_with_closed_receiver() {
    let notifier = UpdateNotifier::new();
    let (sub, rx) = ChannelSubscriber::channel();
    notifier.subscribe(&sub);

    // Drop the receiver to close the channel
    drop(rx);

    assert_eq!(notifier.publish(SyncEvent::WeatherDataUpdated), 1);
    // No assertion beyond delivery count, just checking for no panics.
}
