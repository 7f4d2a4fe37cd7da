use crate::domain::ports::WeatherProvider;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// OpenWeatherMap 當前天氣查詢
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: Client,
    api_base: String,
    api_key: String,
    request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

impl OpenWeatherClient {
    pub fn new(api_base: &str, api_key: &str, request_timeout_secs: u64) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }

    async fn fetch_temperature(&self, city: &str) -> Result<f64> {
        let url = format!("{}/data/2.5/weather", self.api_base);
        let response = self
            .http
            .get(url)
            .timeout(self.request_timeout)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BotError::UpstreamStatusError {
                service: "OpenWeatherMap".to_string(),
                status: response.status().as_u16(),
            });
        }

        let weather: WeatherResponse = response.json().await?;
        Ok(weather.main.temp)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_temperature(&self, city: &str) -> Option<f64> {
        match self.fetch_temperature(city).await {
            Ok(temp) => Some(temp),
            Err(e) => {
                tracing::error!("Weather lookup for '{}' failed: {}", city, e);
                None
            }
        }
    }
}
