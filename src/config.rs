//! Dashboard configuration: defaults, optional JSON file, env overrides.
//!
//! Precedence is CLI flag > environment > config file > default. The file
//! lives at `{config_dir}/roster-dash/config.json` and is optional.

use crate::{
    core::{try_read_to_string, write_string},
    error::{Result, RosterError},
    API_URL_ENV_VAR,
};
use serde::{Deserialize, Serialize};
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::Duration,
};

/// Backend list endpoints cap `limit` at this value.
pub const MAX_FETCH_LIMIT: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend root, without the `/api/v1` prefix.
    pub api_url: String,
    /// Rows per page in list views.
    pub page_size: usize,
    /// How many records a list view fetches before filtering locally.
    pub fetch_limit: u32,
    pub timeout_secs: u64,
    pub health_interval_secs: u64,
    pub refresh_interval_secs: u64,
    pub cache_capacity: usize,
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            page_size: 12,
            fetch_limit: MAX_FETCH_LIMIT,
            timeout_secs: 120,
            health_interval_secs: 10,
            refresh_interval_secs: 60,
            cache_capacity: 32,
            cache_ttl_secs: 60,
        }
    }
}

impl Config {
    /// Path: {config_dir}/roster-dash/config.json
    pub fn default_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".config");
            home
        });
        base.join("roster-dash").join("config.json")
    }

    /// Read `path` if it exists, otherwise fall back to defaults.
    ///
    /// A file that exists but does not parse is an error rather than being
    /// silently ignored.
    pub fn load_from(path: &Path) -> Result<Self> {
        match try_read_to_string(path) {
            Some(contents) => {
                let cfg: Config =
                    serde_json::from_str(&contents).map_err(|e| RosterError::Config {
                        message: format!("parsing '{}': {}", path.display(), e),
                    })?;
                tracing::debug!(path = %path.display(), "loaded config file");
                Ok(cfg)
            }
            None => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Full resolution: file (or defaults), env, then the CLI override.
    pub fn resolve(path: Option<&Path>, api_url_override: Option<String>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        let cfg = Self::load_from(&path)?
            .with_env_overrides()
            .with_api_url(api_url_override);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `ROSTER_API_URL` when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RosterError::Config {
                message: format!("api_url must start with http:// or https:// (got '{}')", url),
            });
        }
        if self.page_size == 0 {
            return Err(RosterError::Config {
                message: "page_size must be greater than zero".to_string(),
            });
        }
        if self.fetch_limit == 0 || self.fetch_limit > MAX_FETCH_LIMIT {
            return Err(RosterError::Config {
                message: format!("fetch_limit must be between 1 and {}", MAX_FETCH_LIMIT),
            });
        }
        Ok(())
    }

    /// Backend root without trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }

    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs.max(1))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_string(path, &json)?;
        Ok(())
    }
}
