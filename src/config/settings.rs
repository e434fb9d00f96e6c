use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Covers both halves of the sync: the link endpoint, the wearable's store,
/// the handheld's forecast location and trigger cadence, and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub sync: SyncSettings,
    pub store: StoreSettings,
    pub source: SourceSettings,
    pub sender: SenderSettings,
    pub logging: LoggingSettings,
}

/// Endpoint of the WebSocket sync link.
#[derive(Debug, Deserialize, Clone)]
pub struct SyncSettings {
    pub host: String,
    pub port: u16,
}

impl SyncSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr())
    }
}

/// Location of the wearable's sled database.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub path: String,
}

/// Preferred location the handheld queries forecasts for.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub location: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SenderSettings {
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize, Default)]
pub struct PartialSettings {
    pub sync: Option<PartialSyncSettings>,
    pub store: Option<PartialStoreSettings>,
    pub source: Option<PartialSourceSettings>,
    pub sender: Option<PartialSenderSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSyncSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSourceSettings {
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSenderSettings {
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sync: SyncSettings {
                host: "127.0.0.1".to_string(),
                port: 8686,
            },
            store: StoreSettings {
                path: "weathersync_db".to_string(),
            },
            source: SourceSettings {
                location: "94043".to_string(),
            },
            sender: SenderSettings { interval_secs: 60 },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Fills every value missing from `partial` with the default.
    pub fn merged(partial: PartialSettings) -> Self {
        let default = Settings::default();

        Settings {
            sync: SyncSettings {
                host: partial
                    .sync
                    .as_ref()
                    .and_then(|s| s.host.clone())
                    .unwrap_or(default.sync.host),
                port: partial
                    .sync
                    .as_ref()
                    .and_then(|s| s.port)
                    .unwrap_or(default.sync.port),
            },
            store: StoreSettings {
                path: partial
                    .store
                    .as_ref()
                    .and_then(|s| s.path.clone())
                    .unwrap_or(default.store.path),
            },
            source: SourceSettings {
                location: partial
                    .source
                    .as_ref()
                    .and_then(|s| s.location.clone())
                    .unwrap_or(default.source.location),
            },
            sender: SenderSettings {
                interval_secs: partial
                    .sender
                    .as_ref()
                    .and_then(|s| s.interval_secs)
                    .unwrap_or(default.sender.interval_secs),
            },
            logging: LoggingSettings {
                level: partial
                    .logging
                    .as_ref()
                    .and_then(|l| l.level.clone())
                    .unwrap_or(default.logging.level),
            },
        }
    }
}
