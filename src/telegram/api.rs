use crate::domain::ports::MessageGateway;
use crate::telegram::types::{ApiResponse, Update};
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Bot API 的薄封裝：一個 token、一個 reqwest Client
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    api_base: String,
    token: String,
    request_timeout: Duration,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, request_timeout_secs: u64) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: Value,
        timeout: Duration,
    ) -> Result<T> {
        tracing::debug!("Calling Telegram method: {}", method);
        let response = self
            .http
            .post(self.method_url(method))
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.ok {
            return Err(BotError::TelegramError {
                method: method.to_string(),
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        envelope.result.ok_or_else(|| BotError::TelegramError {
            method: method.to_string(),
            description: "empty result".to_string(),
        })
    }

    /// Long-poll 拉取更新；offset 用來確認已處理的 update
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let mut body = json!({ "timeout": timeout_secs });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        // 等待時間要蓋過伺服器端的 long-poll 窗口
        let timeout = Duration::from_secs(timeout_secs + 10);
        self.call("getUpdates", body, timeout).await
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<()> {
        let mut body = json!({ "chat_id": chat_id, "text": text });
        if let Some(mode) = parse_mode {
            body["parse_mode"] = json!(mode);
        }
        self.call::<Value>("sendMessage", body, self.request_timeout)
            .await?;
        Ok(())
    }

    pub async fn send_photo_bytes(
        &self,
        chat_id: i64,
        png_bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<()> {
        let photo = Part::bytes(png_bytes)
            .file_name(filename.to_string())
            .mime_str("image/png")?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", photo);

        let response = self
            .http
            .post(self.method_url("sendPhoto"))
            .timeout(self.request_timeout)
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let envelope: ApiResponse<Value> = response.json().await?;
        if !envelope.ok {
            return Err(BotError::TelegramError {
                method: "sendPhoto".to_string(),
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }
        Ok(())
    }

    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        self.call::<Value>("setWebhook", json!({ "url": url }), self.request_timeout)
            .await?;
        Ok(())
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<()> {
        self.call::<Value>(
            "deleteWebhook",
            json!({ "drop_pending_updates": drop_pending_updates }),
            self.request_timeout,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl MessageGateway for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_message(chat_id, text, None).await
    }

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_message(chat_id, text, Some("Markdown")).await
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        png_bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<()> {
        self.send_photo_bytes(chat_id, png_bytes, filename, caption)
            .await
    }
}
