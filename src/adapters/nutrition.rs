use crate::domain::model::FoodInfo;
use crate::domain::ports::NutritionProvider;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// OpenFoodFacts 產品搜尋，本地表找不到時的後備
#[derive(Clone)]
pub struct OpenFoodFactsClient {
    http: Client,
    api_base: String,
    request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    product_name: Option<String>,
    nutriments: Option<Nutriments>,
}

#[derive(Debug, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
}

impl OpenFoodFactsClient {
    pub fn new(api_base: &str, request_timeout_secs: u64) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }

    async fn search(&self, query: &str) -> Result<Option<FoodInfo>> {
        let url = format!("{}/cgi/search.pl", self.api_base);
        let response = self
            .http
            .get(url)
            .timeout(self.request_timeout)
            .query(&[
                ("action", "process"),
                ("search_terms", query),
                ("json", "true"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::UpstreamStatusError {
                service: "OpenFoodFacts".to_string(),
                status: response.status().as_u16(),
            });
        }

        let payload: SearchResponse = response.json().await?;

        // 只看第一個結果：沒有熱量數據就當沒找到
        let Some(first) = payload.products.into_iter().next() else {
            return Ok(None);
        };
        let calories = first
            .nutriments
            .and_then(|n| n.energy_kcal_100g)
            .unwrap_or(0.0);
        if calories == 0.0 {
            return Ok(None);
        }

        Ok(Some(FoodInfo {
            name: first
                .product_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| query.to_string()),
            kcal_per_100g: calories,
        }))
    }
}

#[async_trait]
impl NutritionProvider for OpenFoodFactsClient {
    async fn find_food(&self, query: &str) -> Option<FoodInfo> {
        match self.search(query).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("Food lookup for '{}' failed: {}", query, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_first_product_with_calories_is_used() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/cgi/search.pl")
                .query_param("search_terms", "granola");
            then.status(200).json_body(serde_json::json!({
                "products": [
                    {
                        "product_name": "Crunchy Granola",
                        "nutriments": { "energy-kcal_100g": 471.0 }
                    },
                    {
                        "product_name": "Other Granola",
                        "nutriments": { "energy-kcal_100g": 400.0 }
                    }
                ]
            }));
        });

        let client = OpenFoodFactsClient::new(&server.base_url(), 5);
        let food = client.find_food("granola").await.unwrap();
        mock.assert();
        assert_eq!(food.name, "Crunchy Granola");
        assert_eq!(food.kcal_per_100g, 471.0);
    }

    #[tokio::test]
    async fn test_first_product_without_calories_means_not_found() {
        // Matches the lookup contract: only the first hit is considered
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cgi/search.pl");
            then.status(200).json_body(serde_json::json!({
                "products": [
                    { "product_name": "Mystery item", "nutriments": {} },
                    {
                        "product_name": "Documented item",
                        "nutriments": { "energy-kcal_100g": 100.0 }
                    }
                ]
            }));
        });

        let client = OpenFoodFactsClient::new(&server.base_url(), 5);
        assert!(client.find_food("mystery").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_product_name_falls_back_to_query() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cgi/search.pl");
            then.status(200).json_body(serde_json::json!({
                "products": [
                    { "nutriments": { "energy-kcal_100g": 55.0 } }
                ]
            }));
        });

        let client = OpenFoodFactsClient::new(&server.base_url(), 5);
        let food = client.find_food("персимон").await.unwrap();
        assert_eq!(food.name, "персимон");
    }

    #[tokio::test]
    async fn test_server_error_degrades_to_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cgi/search.pl");
            then.status(500);
        });

        let client = OpenFoodFactsClient::new(&server.base_url(), 5);
        assert!(client.find_food("борщ").await.is_none());
    }
}
