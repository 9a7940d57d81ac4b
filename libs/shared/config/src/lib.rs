use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use shared_models::Locale;

pub const DEFAULT_NOTES_MAX_LENGTH: usize = 500;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upper bound on the free-text notes of a clinic association, in characters.
    pub notes_max_length: usize,
    pub default_locale: Locale,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notes_max_length: DEFAULT_NOTES_MAX_LENGTH,
            default_locale: Locale::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings from a dotenv-formatted file without touching the
    /// process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let vars = dotenv::from_path_iter(path)
            .with_context(|| format!("failed to open env file {}", path.display()))?
            .collect::<std::result::Result<HashMap<String, String>, _>>()
            .with_context(|| format!("failed to parse env file {}", path.display()))?;

        Ok(Self::from_lookup(|key| vars.get(key).cloned()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let notes_max_length = match lookup("SCHEDULE_NOTES_MAX_LENGTH") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(value) if value > 0 => value,
                _ => {
                    warn!("SCHEDULE_NOTES_MAX_LENGTH is invalid ({}), using default", raw);
                    DEFAULT_NOTES_MAX_LENGTH
                }
            },
            None => DEFAULT_NOTES_MAX_LENGTH,
        };

        let default_locale = match lookup("APP_DEFAULT_LOCALE") {
            Some(raw) => raw.parse::<Locale>().unwrap_or_else(|e| {
                warn!("{}, falling back to {}", e, Locale::default());
                Locale::default()
            }),
            None => Locale::default(),
        };

        let log_filter = lookup("RUST_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            notes_max_length,
            default_locale,
            log_filter,
        }
    }
}
