use crate::utils::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 可選的 TOML 設定檔，用來覆蓋端點與逾時設定
///
/// 機密（BOT_TOKEN、WEATHER_API_KEY）只從環境變數讀取，不放進檔案。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub bot: Option<BotSection>,
    pub api: Option<ApiSection>,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotSection {
    pub mode: Option<String>,
    pub webhook_host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub telegram_base: Option<String>,
    pub weather_base: Option<String>,
    pub nutrition_base: Option<String>,
    pub request_timeout_seconds: Option<u64>,
    pub poll_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: Option<bool>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BotError::ConfigError {
            message: format!("Cannot read config file '{}': {}", path.display(), e),
        })?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(content)?;
        Ok(config)
    }
}
