use crate::config::AppConfig;
use crate::runtime::BotDispatcher;
use crate::telegram::api::TelegramClient;
use crate::utils::error::Result;
use std::time::Duration;

/// 本地開發模式：long-poll getUpdates 直到進程被終止
pub async fn run(
    config: &AppConfig,
    client: TelegramClient,
    dispatcher: BotDispatcher,
) -> Result<()> {
    // 清掉殘留的 webhook，順便丟棄積壓的更新
    client.delete_webhook(true).await?;
    tracing::info!("🚀 Polling loop started");

    let mut offset: Option<i64> = None;
    loop {
        match client.get_updates(offset, config.poll_timeout_secs).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    dispatcher.dispatch(update).await;
                }
            }
            Err(e) => {
                // 單次拉取失敗不退出，稍後重試
                tracing::error!("getUpdates failed: {}, retrying in 5s", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}
