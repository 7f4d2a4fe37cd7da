use crate::config::AppConfig;
use crate::runtime::BotDispatcher;
use crate::telegram::api::TelegramClient;
use crate::telegram::types::Update;
use crate::utils::error::{BotError, Result};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared state for the webhook handlers.
#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<BotDispatcher>,
    webhook_token: String,
}

impl AppState {
    pub fn new(dispatcher: Arc<BotDispatcher>, webhook_token: String) -> Self {
        Self {
            dispatcher,
            webhook_token,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/webhook/:token", post(receive_update))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn receive_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(update): Json<Update>,
) -> StatusCode {
    // 路徑裡的 token 就是共享密鑰，對不上一律 404
    if token != state.webhook_token {
        tracing::warn!("Webhook request with mismatched token rejected");
        return StatusCode::NOT_FOUND;
    }
    state.dispatcher.dispatch(update).await;
    StatusCode::OK
}

/// 線上模式：註冊 webhook、開 HTTP 服務直到收到終止信號
pub async fn run(
    config: &AppConfig,
    client: TelegramClient,
    dispatcher: BotDispatcher,
) -> Result<()> {
    let webhook_url = config.webhook_url();
    client.set_webhook(&webhook_url).await?;
    tracing::info!("🔗 Webhook registered: {}", webhook_url);

    let state = AppState::new(Arc::new(dispatcher), config.bot_token.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Web server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BotError::ServerError {
            message: e.to_string(),
        })?;

    // 停機時摘掉 webhook，積壓的更新留給下一次啟動
    client.delete_webhook(false).await?;
    tracing::info!("Webhook removed");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("🛑 Shutdown signal received");
    }
}
