use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::codec::{self, PATH_WEATHER_DATA};
use crate::display::WeatherPanel;
use crate::listener::TransportListener;
use crate::notifier::{ChannelSubscriber, SyncEvent, UpdateNotifier};
use crate::persistence::{TelegramStorage, TelegramStore};
use crate::sender::{SendOutcome, WearUpdater};
use crate::source::{ForecastRow, MemoryWeatherSource};
use crate::telegram::{Telegram, WeatherUnit};
use crate::transport::{DataItem, DataTransport, LoopbackTransport};

#[test]
fn integration_forecast_reaches_watch_face() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    // Wearable side
    let dir = tempdir().unwrap();
    let store = Arc::new(TelegramStore::open(dir.path()).unwrap());
    let notifier = Arc::new(UpdateNotifier::new());
    let panel = Arc::new(WeatherPanel::new(store.clone()));
    let (updates, mut update_rx) = ChannelSubscriber::channel();
    let panel_id = notifier.subscribe(&panel);
    notifier.subscribe(&updates);
    let listener = TransportListener::new(store.clone(), notifier.clone());
    assert!(panel.temperature_line().is_none());

    // Handheld side
    let source = Arc::new(MemoryWeatherSource::new());
    source
        .upsert(
            "94043",
            today,
            ForecastRow {
                weather_condition_id: 800,
                temperature_max: 25.0,
                temperature_min: 15.0,
            },
        )
        .unwrap();
    let (transport, mut link) = LoopbackTransport::connected_pair();
    let updater = WearUpdater::new(source, Arc::new(transport), "94043");

    assert!(matches!(
        updater.do_update_for(today).unwrap(),
        SendOutcome::Sent(_)
    ));
    assert_eq!(
        updater.do_update_for(today).unwrap(),
        SendOutcome::Unchanged
    );

    while let Ok(batch) = link.try_recv() {
        listener.on_data_changed(batch).unwrap();
    }

    let expected = Telegram::new(WeatherUnit::Celsius, 800, 25.0, 15.0);
    assert_eq!(store.load().unwrap(), Some(expected));
    assert_eq!(panel.current(), Some(expected));
    assert_eq!(panel.temperature_line().as_deref(), Some("15°C       25°C"));

    assert_eq!(update_rx.try_recv().unwrap(), SyncEvent::WeatherDataUpdated);
    assert!(update_rx.try_recv().is_err());

    assert!(notifier.unsubscribe(&panel_id));
}

#[test]
fn integration_restart_restores_last_telegram() {
    let dir = tempdir().unwrap();
    let telegram = Telegram::new(WeatherUnit::Fahrenheit, 502, 70.0, 60.0);
    {
        let store = Arc::new(TelegramStore::open(dir.path()).unwrap());
        let listener = TransportListener::new(store, Arc::new(UpdateNotifier::new()));
        let (transport, mut link) = LoopbackTransport::connected_pair();
        transport
            .put_data_item(DataItem::new(PATH_WEATHER_DATA, codec::encode(&telegram)))
            .unwrap();
        listener.on_data_changed(link.try_recv().unwrap()).unwrap();
    }

    let store = Arc::new(TelegramStore::open(dir.path()).unwrap());
    let panel = WeatherPanel::new(store);
    assert_eq!(panel.current(), Some(telegram));
}
