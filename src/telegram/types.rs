use serde::{Deserialize, Serialize};

/// Bot API 回應的統一信封
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_deserializes_from_bot_api_payload() {
        let payload = serde_json::json!({
            "update_id": 1001,
            "message": {
                "message_id": 5,
                "from": {"id": 42, "username": "vasya", "first_name": "Вася"},
                "chat": {"id": 42},
                "text": "/start"
            }
        });
        let update: Update = serde_json::from_value(payload).unwrap();
        assert_eq!(update.update_id, 1001);
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/start"));
        assert_eq!(message.from.unwrap().username.as_deref(), Some("vasya"));
    }

    #[test]
    fn test_update_without_message_is_accepted() {
        let update: Update = serde_json::from_str(r#"{"update_id": 7}"#).unwrap();
        assert!(update.message.is_none());
    }
}
