use std::sync::Arc;
use std::thread;

use tempfile::{TempDir, tempdir};

use super::{TelegramStorage, TelegramStore};
use crate::codec::{KEY_CONDITION, KEY_TEMP_MAX, KEY_TEMP_UNIT};
use crate::telegram::{Telegram, WeatherUnit};
use crate::utils::error::StoreError;

fn create_test_store() -> (TelegramStore, TempDir) {
    let dir = tempdir().unwrap();
    let store = TelegramStore::open(dir.path()).unwrap();
    (store, dir)
}

#[test]
fn test_load_before_save_is_absent() {
    let (store, _dir) = create_test_store();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_save_and_load_telegram() {
    let (store, _dir) = create_test_store();
    let telegram = Telegram::new(WeatherUnit::Fahrenheit, 502, 71.6, 53.15);

    store.save(&telegram).unwrap();

    assert_eq!(store.load().unwrap(), Some(telegram));
}

#[test]
fn test_save_overwrites_previous_record() {
    let (store, _dir) = create_test_store();
    store
        .save(&Telegram::new(WeatherUnit::Celsius, 800, 25.0, 15.0))
        .unwrap();
    let newer = Telegram::new(WeatherUnit::Celsius, 801, 22.5, 12.0);
    store.save(&newer).unwrap();

    assert_eq!(store.load().unwrap(), Some(newer));
}

#[test]
fn test_record_survives_reopen() {
    let dir = tempdir().unwrap();
    let telegram = Telegram::new(WeatherUnit::Celsius, 800, 25.0, 15.0);
    {
        let store = TelegramStore::open(dir.path()).unwrap();
        store.save(&telegram).unwrap();
    }

    let reopened = TelegramStore::open(dir.path()).unwrap();
    assert_eq!(reopened.load().unwrap(), Some(telegram));
}

#[test]
fn test_clear_returns_to_absent() {
    let (store, _dir) = create_test_store();
    store
        .save(&Telegram::new(WeatherUnit::Celsius, 800, 25.0, 15.0))
        .unwrap();
    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_unknown_stored_unit_loads_as_celsius() {
    let (store, _dir) = create_test_store();
    store
        .save(&Telegram::new(WeatherUnit::Fahrenheit, 800, 25.0, 15.0))
        .unwrap();
    store
        .raw_tree()
        .insert(KEY_TEMP_UNIT, &7i32.to_be_bytes()[..])
        .unwrap();
    assert_eq!(store.load().unwrap().unwrap().unit(), WeatherUnit::Celsius);

    store.raw_tree().remove(KEY_TEMP_UNIT).unwrap();
    assert_eq!(store.load().unwrap().unwrap().unit(), WeatherUnit::Celsius);
}

#[test]
fn test_missing_temperature_is_corrupt_not_zero() {
    let (store, _dir) = create_test_store();
    store
        .raw_tree()
        .insert(KEY_CONDITION, &800i32.to_be_bytes()[..])
        .unwrap();

    match store.load() {
        Err(StoreError::Corrupt(key)) => assert_eq!(key, KEY_TEMP_MAX),
        other => panic!("Expected corrupt record, got {other:?}"),
    }
}

#[test]
fn test_concurrent_reader_sees_whole_records() {
    let (store, _dir) = create_test_store();
    let store = Arc::new(store);
    let a = Telegram::new(WeatherUnit::Celsius, 800, 25.0, 15.0);
    let b = Telegram::new(WeatherUnit::Fahrenheit, 600, 30.0, 20.0);
    store.save(&a).unwrap();

    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..50 {
                let next = if i % 2 == 0 { b } else { a };
                store.save(&next).unwrap();
            }
        })
    };

    for _ in 0..50 {
        let seen = store.load().unwrap().unwrap();
        assert!(seen == a || seen == b, "torn read: {seen:?}");
    }
    writer.join().unwrap();
}
