//! Environment-driven settings for the reminder host.
//! `.env` is read first (if present), then the process environment.

use anyhow::{Context, Result, anyhow, bail};
use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

use crate::domain::repositories::TODO_STORAGE_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Json,
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("Unknown storage backend '{}' (expected json, sqlite or memory)", other),
        }
    }
}

impl StorageBackend {
    fn default_path(&self) -> PathBuf {
        match self {
            StorageBackend::Json | StorageBackend::Memory => {
                PathBuf::from(format!("{}.json", TODO_STORAGE_KEY))
            }
            StorageBackend::Sqlite => PathBuf::from(format!("{}.db", TODO_STORAGE_KEY)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub data_path: PathBuf,
    pub preferences_path: PathBuf,
    pub timezone: Option<Tz>,
    pub log_level: Level,
    pub idle_poll: Duration,
}

impl AppConfig {
    /// Loads `.env` and reads the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys use defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match lookup("TODO_STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Json,
        };

        let data_path = lookup("TODO_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| storage_backend.default_path());

        let preferences_path = lookup("TODO_PREFERENCES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("preferences.json"));

        let timezone = lookup("TODO_TIMEZONE")
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                value
                    .trim()
                    .parse::<Tz>()
                    .map_err(|e| anyhow!("Invalid TODO_TIMEZONE '{}': {}", value, e))
            })
            .transpose()?;

        let log_level = match lookup("TODO_LOG_LEVEL") {
            Some(value) => Level::from_str(value.trim())
                .with_context(|| format!("Invalid TODO_LOG_LEVEL '{}'", value))?,
            None => Level::INFO,
        };

        let idle_poll = match lookup("TODO_IDLE_POLL_SECS") {
            Some(value) => Duration::from_secs(
                value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid TODO_IDLE_POLL_SECS '{}'", value))?,
            ),
            None => Duration::from_secs(300),
        };

        Ok(Self {
            storage_backend,
            data_path,
            preferences_path,
            timezone,
            log_level,
            idle_poll,
        })
    }
}
