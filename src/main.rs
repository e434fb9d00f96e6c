//! CLI for weathersync
//!
//! Subcommands:
//! - `watch`: run the wearable side (store, display state, sync server)
//! - `phone`: run the handheld side against a forecast given on the command line

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};

use weathersync::config::{Settings, load_config};
use weathersync::display::WeatherPanel;
use weathersync::listener::TransportListener;
use weathersync::notifier::UpdateNotifier;
use weathersync::persistence::TelegramStore;
use weathersync::sender::{SendOutcome, WearUpdater};
use weathersync::source::{ForecastRow, MemoryWeatherSource};
use weathersync::transport::{DataTransport, WebSocketTransport, start_sync_server};
use weathersync::utils::error::SyncError;
use weathersync::utils::logging;

#[derive(Parser)]
#[command(name = "weathersync")]
enum Command {
    /// Run the wearable side: receive telegrams, store them, keep the face current
    Watch,
    /// Run the handheld side with today's forecast for the configured location
    Phone {
        /// Weather condition code of today's forecast
        #[arg(long, allow_negative_numbers = true)]
        condition: i32,
        /// Today's maximum temperature in Celsius
        #[arg(long, allow_negative_numbers = true)]
        max: f64,
        /// Today's minimum temperature in Celsius
        #[arg(long, allow_negative_numbers = true)]
        min: f64,
        /// Sync endpoint to connect to (default: from configuration)
        #[arg(long)]
        url: Option<String>,
        /// Run a single update instead of one per configured interval
        #[arg(long)]
        once: bool,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cmd = Command::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {e}");
            return;
        }
    };
    logging::init(&config.logging.level);

    let result = match cmd {
        Command::Watch => run_watch(config).await,
        Command::Phone {
            condition,
            max,
            min,
            url,
            once,
        } => {
            let row = ForecastRow {
                weather_condition_id: condition,
                temperature_max: max,
                temperature_min: min,
            };
            run_phone(config, row, url, once).await
        }
    };

    if let Err(e) = result {
        error!("weathersync failed: {e}");
    }
}

async fn run_watch(config: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(TelegramStore::open(&config.store.path)?);
    let notifier = Arc::new(UpdateNotifier::new());

    let panel = Arc::new(WeatherPanel::new(store.clone()));
    let panel_id = notifier.subscribe(&panel);
    match panel.temperature_line() {
        Some(line) => info!("Showing stored weather: {line}"),
        None => info!("No weather data yet"),
    }

    let listener = Arc::new(TransportListener::new(store, notifier.clone()));
    let addr = config.sync.addr();

    tokio::select! {
        result = start_sync_server(&addr, listener) => {
            result?;
            error!("Sync server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    notifier.unsubscribe(&panel_id);
    Ok(())
}

async fn run_phone(
    config: Settings,
    row: ForecastRow,
    url: Option<String>,
    once: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let location = config.source.location.clone();
    let source = Arc::new(MemoryWeatherSource::new());
    source.upsert(&location, Local::now().date_naive(), row)?;

    let url = url.unwrap_or_else(|| config.sync.url());
    let transport = Arc::new(WebSocketTransport::new());
    if let Err(e) = transport.connect(&url).await {
        warn!("Could not reach wearable at {url}: {e}");
    }

    let updater = WearUpdater::new(source, transport.clone(), &location);

    if once {
        report(updater.do_update());
        transport.close().await;
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.sender.interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !transport.is_connected() {
                    if let Err(e) = transport.connect(&url).await {
                        warn!("Could not reach wearable at {url}: {e}");
                    }
                }
                report(updater.do_update());
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received. Exiting gracefully.");
                break;
            }
        }
    }

    transport.close().await;
    Ok(())
}

fn report(result: Result<SendOutcome, SyncError>) {
    match result {
        Ok(SendOutcome::Sent(telegram)) => info!("Pushed {}", telegram.temperature_line()),
        Ok(SendOutcome::Unchanged) => info!("Wearable already up to date"),
        Ok(SendOutcome::NoData) => info!("No forecast for today yet"),
        Ok(SendOutcome::NotConnected) => warn!("Not connected, update skipped"),
        Err(e) => error!("Update failed: {e}"),
    }
}
