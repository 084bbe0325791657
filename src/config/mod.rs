//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the `TRIBUNA`
//! prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use tribuna::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod storage;
mod typist;

pub use error::{ConfigError, ValidationError};
pub use storage::{StorageBackend, StorageConfig};
pub use typist::TypistConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Script source and session storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Dialogue typist pacing
    #[serde(default)]
    pub typist: TypistConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables with the `TRIBUNA`
    /// prefix, e.g. `TRIBUNA__STORAGE__SCRIPT_DIR=./cases` or
    /// `TRIBUNA__TYPIST__CHUNK_DELAY_MS=250`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its typed
    /// field.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRIBUNA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any section is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.typist.validate()?;
        Ok(())
    }
}
