pub mod polling;
pub mod webhook;

use crate::adapters::{OpenFoodFactsClient, OpenWeatherClient};
use crate::core::Dispatcher;
use crate::telegram::api::TelegramClient;

/// 線上組態的 Dispatcher：真實的 Telegram / 天氣 / 食品 client
pub type BotDispatcher = Dispatcher<TelegramClient, OpenWeatherClient, OpenFoodFactsClient>;
