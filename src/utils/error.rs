use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Telegram API rejected {method}: {description}")]
    TelegramError { method: String, description: String },

    #[error("{service} returned HTTP {status}")]
    UpstreamStatusError { service: String, status: u16 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Chart rendering failed: {message}")]
    ChartError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

/// 錯誤嚴重程度，決定進程的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Telegram,
    Rendering,
    System,
}

impl BotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::ApiError(_) | BotError::UpstreamStatusError { .. } => ErrorCategory::Network,
            BotError::TelegramError { .. } => ErrorCategory::Telegram,
            BotError::ConfigError { .. }
            | BotError::MissingConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::TomlError(_) => ErrorCategory::Configuration,
            BotError::ChartError { .. } => ErrorCategory::Rendering,
            BotError::IoError(_) | BotError::SerializationError(_) | BotError::ServerError { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BotError::ChartError { .. } => ErrorSeverity::Low,
            BotError::ApiError(_) | BotError::UpstreamStatusError { .. } => ErrorSeverity::Medium,
            BotError::TelegramError { .. } | BotError::SerializationError(_) => ErrorSeverity::High,
            BotError::ConfigError { .. }
            | BotError::MissingConfigError { .. }
            | BotError::InvalidConfigValueError { .. }
            | BotError::TomlError(_)
            | BotError::IoError(_)
            | BotError::ServerError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BotError::ApiError(_) | BotError::UpstreamStatusError { .. } => {
                "Check network connectivity and the upstream service status, then retry".to_string()
            }
            BotError::TelegramError { .. } => {
                "Verify BOT_TOKEN is valid and the bot has not been revoked".to_string()
            }
            BotError::ConfigError { .. }
            | BotError::MissingConfigError { .. }
            | BotError::InvalidConfigValueError { .. } => {
                "Review environment variables and the configuration file".to_string()
            }
            BotError::TomlError(_) => "Fix the TOML syntax in the configuration file".to_string(),
            BotError::ChartError { .. } => {
                "Progress is still available as text via /check_progress".to_string()
            }
            BotError::ServerError { .. } => {
                "Check that the port is free and PORT is set correctly".to_string()
            }
            BotError::IoError(_) | BotError::SerializationError(_) => {
                "Inspect the log for the underlying cause".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::ApiError(_) | BotError::UpstreamStatusError { .. } => {
                "An external service is unreachable".to_string()
            }
            BotError::TelegramError { description, .. } => {
                format!("Telegram refused the request: {}", description)
            }
            BotError::ConfigError { message } => format!("Configuration problem: {}", message),
            BotError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            BotError::TomlError(e) => format!("Configuration file is not valid TOML: {}", e),
            BotError::ChartError { .. } => "Could not draw the progress chart".to_string(),
            BotError::ServerError { message } => format!("Web server failed: {}", message),
            BotError::IoError(e) => format!("IO failure: {}", e),
            BotError::SerializationError(e) => format!("Malformed data: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
