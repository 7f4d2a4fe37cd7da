use fitness_bot::adapters::{OpenFoodFactsClient, OpenWeatherClient};
use fitness_bot::core::new_shared_store;
use fitness_bot::runtime::webhook::{create_router, AppState};
use fitness_bot::runtime::BotDispatcher;
use fitness_bot::TelegramClient;
use httpmock::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;

async fn spawn_app(telegram_base: &str) -> SocketAddr {
    let client = TelegramClient::new(telegram_base, "123:abc", 5);
    let weather = OpenWeatherClient::new(telegram_base, "unused", 5);
    let nutrition = OpenFoodFactsClient::new(telegram_base, 5);
    let dispatcher: BotDispatcher =
        fitness_bot::Dispatcher::new(client, weather, nutrition, new_shared_store());

    let state = AppState::new(Arc::new(dispatcher), "123:abc".to_string());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_health_endpoints_answer_ok() {
    let telegram = MockServer::start();
    let addr = spawn_app(&telegram.base_url()).await;

    for path in ["/", "/health"] {
        let response = reqwest::get(format!("http://{}{}", addr, path))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.text().await.unwrap(), "OK");
    }
}

#[tokio::test]
async fn test_webhook_rejects_mismatched_token() {
    let telegram = MockServer::start();
    let send = telegram.mock(|when, then| {
        when.method(POST).path("/bot123:abc/sendMessage");
        then.status(200)
            .json_body(serde_json::json!({ "ok": true, "result": {} }));
    });

    let addr = spawn_app(&telegram.base_url()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/webhook/wrong-token", addr))
        .json(&serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "chat": { "id": 42 },
                "text": "/start"
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(send.hits(), 0);
}

#[tokio::test]
async fn test_webhook_dispatches_valid_update() {
    let telegram = MockServer::start();
    let send = telegram.mock(|when, then| {
        when.method(POST)
            .path("/bot123:abc/sendMessage")
            .body_contains("Доступные команды");
        then.status(200)
            .json_body(serde_json::json!({ "ok": true, "result": {} }));
    });

    let addr = spawn_app(&telegram.base_url()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/webhook/123:abc", addr))
        .json(&serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "from": { "id": 42, "username": "tester" },
                "chat": { "id": 42 },
                "text": "/start"
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    send.assert();
}

#[tokio::test]
async fn test_webhook_rejects_malformed_payload() {
    let telegram = MockServer::start();
    let addr = spawn_app(&telegram.base_url()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/webhook/123:abc", addr))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
