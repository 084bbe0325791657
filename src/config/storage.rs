//! Script source and session storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which session store backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// JSON snapshot files under `snapshot_dir`
    #[default]
    File,
    /// PostgreSQL via `database_url`
    Postgres,
    /// In-process only; sessions vanish on exit
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding authored case script YAML files
    #[serde(default = "default_script_dir")]
    pub script_dir: String,

    /// Session store backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for JSON session snapshots (file backend)
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// PostgreSQL connection URL (postgres backend)
    #[serde(default)]
    pub database_url: Option<String>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.script_dir.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__SCRIPT_DIR"));
        }
        match self.backend {
            StorageBackend::File => {
                if self.snapshot_dir.is_empty() {
                    return Err(ValidationError::MissingRequired("STORAGE__SNAPSHOT_DIR"));
                }
            }
            StorageBackend::Postgres => match &self.database_url {
                None => return Err(ValidationError::MissingRequired("STORAGE__DATABASE_URL")),
                Some(url)
                    if !url.starts_with("postgres://") && !url.starts_with("postgresql://") =>
                {
                    return Err(ValidationError::InvalidDatabaseUrl)
                }
                Some(_) => {}
            },
            StorageBackend::Memory => {}
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            script_dir: default_script_dir(),
            backend: StorageBackend::default(),
            snapshot_dir: default_snapshot_dir(),
            database_url: None,
        }
    }
}

fn default_script_dir() -> String {
    "./cases".to_string()
}

fn default_snapshot_dir() -> String {
    "./sessions".to_string()
}
