pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod runtime;
pub mod telegram;
pub mod utils;

pub use crate::config::{AppConfig, CliArgs, Mode};
pub use crate::core::Dispatcher;
pub use crate::telegram::api::TelegramClient;
pub use crate::utils::error::{BotError, Result};
