pub mod toml_config;

use crate::utils::error::{BotError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use clap::Parser;
use std::collections::HashMap;
use std::str::FromStr;
use toml_config::FileConfig;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TELEGRAM_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_WEATHER_BASE: &str = "http://api.openweathermap.org";
pub const DEFAULT_NUTRITION_BASE: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Parser)]
#[command(name = "fitness-bot")]
#[command(about = "Telegram bot that tracks water, food calories and workouts")]
pub struct CliArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override run mode: "polling" or "webhook"
    #[arg(long)]
    pub mode: Option<String>,

    /// Override the listening port for webhook mode
    #[arg(long)]
    pub port: Option<u16>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log periodic CPU/memory stats of the running process
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON (for container log collectors)
    #[arg(long)]
    pub log_json: bool,
}

/// 運行模式：本地開發用 polling，線上部署用 webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Polling,
    Webhook,
}

impl FromStr for Mode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polling" => Ok(Mode::Polling),
            "webhook" => Ok(Mode::Webhook),
            other => Err(BotError::InvalidConfigValueError {
                field: "MODE".to_string(),
                value: other.to_string(),
                reason: "Expected 'polling' or 'webhook'".to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Polling => write!(f, "polling"),
            Mode::Webhook => write!(f, "webhook"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub weather_api_key: String,
    pub mode: Mode,
    pub webhook_host: String,
    pub port: u16,
    pub telegram_api_base: String,
    pub weather_api_base: String,
    pub nutrition_api_base: String,
    pub poll_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub monitor: bool,
}

impl AppConfig {
    /// 讀取實際環境：CLI 參數 > 環境變數 > TOML 檔案 > 預設值
    pub fn load(cli: &CliArgs) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_parts(cli, &file, &env)
    }

    pub fn from_parts(
        cli: &CliArgs,
        file: &FileConfig,
        env: &HashMap<String, String>,
    ) -> Result<Self> {
        let bot_file = file.bot.clone().unwrap_or_default();
        let api_file = file.api.clone().unwrap_or_default();
        let monitoring_file = file.monitoring.clone().unwrap_or_default();

        let mode_str = cli
            .mode
            .clone()
            .or_else(|| env.get("MODE").cloned())
            .or(bot_file.mode)
            .unwrap_or_else(|| "polling".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let port = match cli.port {
            Some(p) => p,
            None => match env.get("PORT") {
                // 平台在運行時注入 PORT，entrypoint 必須優先採用
                Some(raw) => raw
                    .parse::<u16>()
                    .map_err(|_| BotError::InvalidConfigValueError {
                        field: "PORT".to_string(),
                        value: raw.clone(),
                        reason: "Expected an integer between 1 and 65535".to_string(),
                    })?,
                None => bot_file.port.unwrap_or(DEFAULT_PORT),
            },
        };

        Ok(Self {
            bot_token: env.get("BOT_TOKEN").cloned().unwrap_or_default(),
            weather_api_key: env.get("WEATHER_API_KEY").cloned().unwrap_or_default(),
            mode,
            webhook_host: env
                .get("WEBHOOK_HOST")
                .cloned()
                .or(bot_file.webhook_host)
                .unwrap_or_default(),
            port,
            telegram_api_base: api_file
                .telegram_base
                .unwrap_or_else(|| DEFAULT_TELEGRAM_BASE.to_string()),
            weather_api_base: api_file
                .weather_base
                .unwrap_or_else(|| DEFAULT_WEATHER_BASE.to_string()),
            nutrition_api_base: api_file
                .nutrition_base
                .unwrap_or_else(|| DEFAULT_NUTRITION_BASE.to_string()),
            poll_timeout_secs: api_file
                .poll_timeout_seconds
                .unwrap_or(DEFAULT_POLL_TIMEOUT_SECS),
            request_timeout_secs: api_file
                .request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            monitor: cli.monitor || monitoring_file.enabled.unwrap_or(false),
        })
    }

    /// Webhook 的完整 URL，路徑帶著 bot token
    pub fn webhook_url(&self) -> String {
        format!(
            "{}/webhook/{}",
            self.webhook_host.trim_end_matches('/'),
            self.bot_token
        )
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(BotError::MissingConfigError {
                field: "BOT_TOKEN".to_string(),
            });
        }
        if self.bot_token == "YOUR_BOT_TOKEN" {
            return Err(BotError::InvalidConfigValueError {
                field: "BOT_TOKEN".to_string(),
                value: self.bot_token.clone(),
                reason: "Placeholder token; set a real token from @BotFather".to_string(),
            });
        }

        validate_positive_number("PORT", u64::from(self.port), 1)?;
        validate_range("poll_timeout_seconds", self.poll_timeout_secs, 1, 300)?;
        validate_positive_number("request_timeout_seconds", self.request_timeout_secs, 1)?;

        validate_url("telegram_base", &self.telegram_api_base)?;
        validate_url("weather_base", &self.weather_api_base)?;
        validate_url("nutrition_base", &self.nutrition_api_base)?;

        if self.mode == Mode::Webhook {
            validate_url("WEBHOOK_HOST", &self.webhook_host)?;
        }

        // WEATHER_API_KEY 可以缺省：查不到氣溫時配額照常計算
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_defaults() -> CliArgs {
        CliArgs {
            config: None,
            mode: None,
            port: None,
            verbose: false,
            monitor: false,
            log_json: false,
        }
    }

    fn env_with_token() -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("BOT_TOKEN".to_string(), "123:abc".to_string());
        env
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config =
            AppConfig::from_parts(&cli_defaults(), &FileConfig::default(), &env_with_token())
                .unwrap();
        assert_eq!(config.mode, Mode::Polling);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.telegram_api_base, DEFAULT_TELEGRAM_BASE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_env_override_wins_over_file() {
        let mut env = env_with_token();
        env.insert("PORT".to_string(), "10000".to_string());
        let file = FileConfig {
            bot: Some(toml_config::BotSection {
                port: Some(9000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = AppConfig::from_parts(&cli_defaults(), &file, &env).unwrap();
        assert_eq!(config.port, 10000);
    }

    #[test]
    fn test_cli_port_beats_env() {
        let mut env = env_with_token();
        env.insert("PORT".to_string(), "10000".to_string());
        let cli = CliArgs {
            port: Some(7777),
            ..cli_defaults()
        };
        let config = AppConfig::from_parts(&cli, &FileConfig::default(), &env).unwrap();
        assert_eq!(config.port, 7777);
    }

    #[test]
    fn test_webhook_mode_requires_host() {
        let mut env = env_with_token();
        env.insert("MODE".to_string(), "webhook".to_string());
        let config =
            AppConfig::from_parts(&cli_defaults(), &FileConfig::default(), &env).unwrap();
        assert!(config.validate().is_err());

        env.insert(
            "WEBHOOK_HOST".to_string(),
            "https://my-bot.onrender.com".to_string(),
        );
        let config =
            AppConfig::from_parts(&cli_defaults(), &FileConfig::default(), &env).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.webhook_url(),
            "https://my-bot.onrender.com/webhook/123:abc"
        );
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let config = AppConfig::from_parts(
            &cli_defaults(),
            &FileConfig::default(),
            &HashMap::new(),
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let mut env = env_with_token();
        env.insert("MODE".to_string(), "serverless".to_string());
        assert!(AppConfig::from_parts(&cli_defaults(), &FileConfig::default(), &env).is_err());
    }

    #[test]
    fn test_invalid_port_value_is_rejected() {
        let mut env = env_with_token();
        env.insert("PORT".to_string(), "not-a-port".to_string());
        assert!(AppConfig::from_parts(&cli_defaults(), &FileConfig::default(), &env).is_err());
    }
}
