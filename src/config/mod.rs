//! Builds the `AppConfig` from the built-in defaults, the files in `config/` and the environment.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod data;
mod error;

use std::sync::OnceLock;
use tracing::info;

// Re-export config structs
pub use data::{AppConfig, DbConfig, Environment, NetConfig, SslRequire};
pub use error::{ConfigError, ConfigResult};

/// Reads `APP_ENVIRONMENT` (defaults to `local`) and loads the matching configuration.
/// When `DATABASE_URL` is set it replaces the file based `DbConfig`.
pub fn build_config() -> ConfigResult<AppConfig> {
    let config_dir = std::env::current_dir()?.join("config");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()?;

    let mut config = AppConfig::load(&config_dir, environment)?;

    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        config.db_config = DbConfig::try_from(database_url.as_str())?;
    }

    Ok(config)
}

/// Allocates a static `OnceLock` containing `AppConfig`.
/// Every caller after the first gets a &'static ref to the same AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!(
            "{:<20} - Initializing the configuration",
            "get_or_init_config"
        );
        build_config().unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"))
    })
}
