use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use seiyuu_api::anilist::{ClientSettings, PaginationSettings, ReqwestTransport};

use crate::error::SeiyuuError;
use crate::models::SummaryOrder;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub pagination: PaginationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    pub media_per_page: u32,
    pub characters_per_page: u32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub inter_page_delay_ms: u64,
    pub rate_limit_ceiling_secs: u64,
    pub rate_limit_fallback_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub order: SummaryOrder,
}

impl AppConfig {
    /// Load config: user file (if exists) over built-in defaults.
    pub fn load() -> Result<Self, SeiyuuError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::parse(DEFAULT_CONFIG)
        }
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, SeiyuuError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SeiyuuError::Config(e.to_string()))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, SeiyuuError> {
        toml::from_str(content).map_err(|e| SeiyuuError::Config(e.to_string()))
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SeiyuuError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SeiyuuError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), SeiyuuError> {
        self.save_to(&Self::config_path())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "seiyuu")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            media_per_page: self.api.media_per_page,
            characters_per_page: self.api.characters_per_page,
            pagination: PaginationSettings {
                inter_page_delay: Duration::from_millis(self.pagination.inter_page_delay_ms),
                rate_limit_ceiling: Duration::from_secs(self.pagination.rate_limit_ceiling_secs),
                rate_limit_fallback: Duration::from_secs(
                    self.pagination.rate_limit_fallback_secs,
                ),
            },
        }
    }

    pub fn transport(&self) -> Result<ReqwestTransport, SeiyuuError> {
        Ok(ReqwestTransport::new(
            self.api.endpoint.clone(),
            Duration::from_secs(self.api.request_timeout_secs),
        )?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
