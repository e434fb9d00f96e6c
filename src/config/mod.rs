mod settings;

use config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{
    LoggingSettings, SenderSettings, Settings, SourceSettings, StoreSettings, SyncSettings,
};

/// Prefix of environment variables read by [`load_config`], e.g.
/// `WEATHERSYNC_SYNC__PORT=9000` or `WEATHERSYNC_SENDER__INTERVAL_SECS=30`.
pub const ENV_PREFIX: &str = "WEATHERSYNC";

/// Loads the configuration from `config/default` and environment variables,
/// merged over the defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Same as [`load_config`] with an explicit base name for the optional file
/// (any extension the `config` crate understands).
pub fn load_config_from(file: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(Settings::merged(partial))
}
