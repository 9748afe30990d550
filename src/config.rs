//! Process configuration, read from environment variables.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_FRONTEND_DIR: &str = "phonebook-frontend/build";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Whether the process also serves the pre-built frontend bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Mode::Production
        } else {
            Mode::Development
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// MongoDB connection string. `None` keeps contacts in memory.
    pub database_url: Option<String>,
    pub mode: Mode,
    pub frontend_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            mode: Mode::Development,
            frontend_dir: PathBuf::from(DEFAULT_FRONTEND_DIR),
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = try_load(&var, "PORT", DEFAULT_PORT)?;

        let database_url = var("MONGODB_URI");
        if database_url.is_none() {
            warn!("MONGODB_URI not set, contacts will only be kept in memory");
        }

        let mode = var("APP_ENV")
            .map(|value| Mode::from_env_value(&value))
            .unwrap_or_default();

        let frontend_dir = var("FRONTEND_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FRONTEND_DIR));

        Ok(Self {
            port,
            database_url,
            mode,
            frontend_dir,
        })
    }

    pub fn is_production(&self) -> bool {
        self.mode == Mode::Production
    }
}

fn try_load<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
