//! Controller settings read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::types::{BASE_DELAY_MS, HOLD_THRESHOLD_MS, INPUT_TIMEOUT_MS};

pub const ENV_DB: &str = "RETRO_ARCADE_DB";
pub const ENV_BASE_DELAY_MS: &str = "RETRO_ARCADE_BASE_DELAY_MS";
pub const ENV_HOLD_MS: &str = "RETRO_ARCADE_HOLD_MS";
pub const ENV_INPUT_TIMEOUT_MS: &str = "RETRO_ARCADE_INPUT_TIMEOUT_MS";
pub const ENV_LOG: &str = "RETRO_ARCADE_LOG";

pub const DEFAULT_DB_PATH: &str = "game_data.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of milliseconds, got {value:?}")]
    InvalidMillis { name: &'static str, value: String },
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// High-score record file
    pub db_path: PathBuf,
    /// Tick delay at speed 1
    pub base_delay: Duration,
    /// Same key again within this window counts as held
    pub hold_threshold: Duration,
    /// Upper bound on one blocking terminal read
    pub input_timeout: Duration,
    /// Log file; nothing is logged when unset
    pub log_path: Option<PathBuf>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            base_delay: Duration::from_millis(BASE_DELAY_MS),
            hold_threshold: Duration::from_millis(HOLD_THRESHOLD_MS),
            input_timeout: Duration::from_millis(INPUT_TIMEOUT_MS),
            log_path: None,
        }
    }
}

impl ControllerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset or blank values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let millis = |name: &'static str, default: u64| -> Result<Duration, ConfigError> {
            let Some(raw) = var(name) else {
                return Ok(Duration::from_millis(default));
            };
            let ms: u64 = raw.parse().map_err(|_| ConfigError::InvalidMillis {
                name,
                value: raw.clone(),
            })?;
            if ms == 0 {
                return Err(ConfigError::Zero { name });
            }
            Ok(Duration::from_millis(ms))
        };

        Ok(Self {
            db_path: var(ENV_DB)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            base_delay: millis(ENV_BASE_DELAY_MS, BASE_DELAY_MS)?,
            hold_threshold: millis(ENV_HOLD_MS, HOLD_THRESHOLD_MS)?,
            input_timeout: millis(ENV_INPUT_TIMEOUT_MS, INPUT_TIMEOUT_MS)?,
            log_path: var(ENV_LOG).map(PathBuf::from),
        })
    }
}
