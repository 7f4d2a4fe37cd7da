use crate::core::handlers::BotHandlers;
use crate::core::state::{ConversationState, SharedStore};
use crate::domain::ports::{MessageGateway, NutritionProvider, WeatherProvider};
use crate::telegram::types::Update;
use crate::utils::error::Result;
use regex::Regex;
use std::sync::OnceLock;

fn command_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^/([a-zA-Z_]+)(?:@[A-Za-z0-9_]+)?(?:\s+(.*))?$").expect("valid regex")
    })
}

/// 解析 "/command@botname args" → (command, args)
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let caps = command_regex().captures(text.trim())?;
    let name = caps.get(1)?.as_str().to_lowercase();
    let args = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Some((name, args))
}

/// 把每條 Telegram 更新導到對應的 handler
pub struct Dispatcher<G, W, N> {
    handlers: BotHandlers<G, W, N>,
    store: SharedStore,
}

impl<G, W, N> Dispatcher<G, W, N>
where
    G: MessageGateway,
    W: WeatherProvider,
    N: NutritionProvider,
{
    pub fn new(gateway: G, weather: W, nutrition: N, store: SharedStore) -> Self {
        Self {
            handlers: BotHandlers::new(gateway, weather, nutrition, store.clone()),
            store,
        }
    }

    /// 單條更新的完整處理；handler 出錯只記日誌，迴圈不中斷
    pub async fn dispatch(&self, update: Update) {
        let Some(message) = update.message else {
            tracing::debug!("Update {} carries no message, skipped", update.update_id);
            return;
        };
        let chat_id = message.chat.id;
        let user_id = message.from.as_ref().map(|u| u.id).unwrap_or(chat_id);
        let Some(text) = message.text else {
            tracing::debug!("Non-text message in chat {}, skipped", chat_id);
            return;
        };

        // 所有進來的訊息先記錄一條
        let username = message
            .from
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .unwrap_or("-");
        tracing::info!("User {} (@{}): {}", user_id, username, text);

        if let Err(e) = self.route(chat_id, user_id, &text).await {
            tracing::error!("❌ Update handling failed for chat {}: {}", chat_id, e);
        }
    }

    async fn route(&self, chat_id: i64, user_id: i64, text: &str) -> Result<()> {
        let state = self.store.lock().await.state(user_id);

        if let Some((command, args)) = parse_command(text) {
            // /start 和 /set_profile 隨時生效，會中斷進行中的對話
            match command.as_str() {
                "start" => {
                    self.store.lock().await.clear_state(user_id);
                    return self.handlers.cmd_start(chat_id).await;
                }
                "set_profile" => return self.handlers.cmd_set_profile(chat_id, user_id).await,
                _ => {}
            }

            if state == ConversationState::Idle {
                return match command.as_str() {
                    "log_water" => self.handlers.cmd_log_water(chat_id, user_id, &args).await,
                    "log_food" => self.handlers.cmd_log_food(chat_id, user_id, &args).await,
                    "log_workout" => {
                        self.handlers.cmd_log_workout(chat_id, user_id, &args).await
                    }
                    "check_progress" => self.handlers.cmd_check_progress(chat_id, user_id).await,
                    "show_graph" => self.handlers.cmd_show_graph(chat_id, user_id).await,
                    "recommendations" => {
                        self.handlers.cmd_recommendations(chat_id, user_id).await
                    }
                    other => {
                        tracing::debug!("Unknown command /{} ignored", other);
                        Ok(())
                    }
                };
            }
        }

        if state != ConversationState::Idle {
            // 對話進行中，訊息是當前步驟的回答
            return self
                .handlers
                .handle_state_input(chat_id, user_id, text, state)
                .await;
        }

        tracing::debug!("Plain message outside of any dialog, ignored");
        Ok(())
    }
}
