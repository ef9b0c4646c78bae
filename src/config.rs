use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CABINS_PATH, DEFAULT_CABINS_TIMEOUT_MS, DEFAULT_SHIPS_PATH,
    DEFAULT_SHIPS_TIMEOUT_MS, PLACEHOLDER_PRICE,
};
use crate::error::{CatalogError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub ships_path: String,
    pub cabins_path: String,
    pub ships_timeout_ms: u64,
    pub cabins_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            ships_path: DEFAULT_SHIPS_PATH.to_string(),
            cabins_path: DEFAULT_CABINS_PATH.to_string(),
            ships_timeout_ms: DEFAULT_SHIPS_TIMEOUT_MS,
            cabins_timeout_ms: DEFAULT_CABINS_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    pub fn ships_url(&self) -> String {
        join_url(&self.base_url, &self.ships_path)
    }

    pub fn cabins_url(&self) -> String {
        join_url(&self.base_url, &self.cabins_path)
    }

    pub fn ships_timeout(&self) -> Duration {
        Duration::from_millis(self.ships_timeout_ms)
    }

    pub fn cabins_timeout(&self) -> Duration {
        Duration::from_millis(self.cabins_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub placeholder_price: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            placeholder_price: PLACEHOLDER_PRICE,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling JSON log; console only when unset
    pub dir: Option<String>,
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

impl Config {
    /// Load `config.toml` when present, then apply environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        let path = Path::new(DEFAULT_CONFIG_PATH);
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load an explicit config file, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overrides keyed by `CATALOG_*` names. `lookup` is injected so tests avoid process env.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CATALOG_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Some(v) = lookup("CATALOG_SHIPS_PATH") {
            self.api.ships_path = v;
        }
        if let Some(v) = lookup("CATALOG_CABINS_PATH") {
            self.api.cabins_path = v;
        }
        if let Some(v) = lookup("CATALOG_SHIPS_TIMEOUT_MS") {
            self.api.ships_timeout_ms = parse_env("CATALOG_SHIPS_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("CATALOG_CABINS_TIMEOUT_MS") {
            self.api.cabins_timeout_ms = parse_env("CATALOG_CABINS_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("CATALOG_PLACEHOLDER_PRICE") {
            self.catalog.placeholder_price = parse_env("CATALOG_PLACEHOLDER_PRICE", &v)?;
        }
        if let Some(v) = lookup("CATALOG_LOG_DIR") {
            self.logging.dir = Some(v);
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::Config(format!("{key} has invalid value '{value}'")))
}
