use crate::domain::model::FoodInfo;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 查詢城市當前氣溫；失敗時回傳 None，配額計算照常進行
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_temperature(&self, city: &str) -> Option<f64>;
}

/// 依產品名稱查詢每 100 克熱量
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    async fn find_food(&self, query: &str) -> Option<FoodInfo>;
}

/// 對話的出口：往聊天發送文字、Markdown 或圖片
#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;

    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()>;

    async fn send_photo(
        &self,
        chat_id: i64,
        png_bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<()>;
}
