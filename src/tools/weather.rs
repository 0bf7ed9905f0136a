//! Current weather by city (OpenWeatherMap).

use async_trait::async_trait;
use serde_json::Value;

use super::{input_arg, plain, Tool};
use crate::config::ProvidersConfig;

pub const WEATHER_UNAVAILABLE: &str = "Weather info not available.";

pub struct WeatherLookup {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherLookup {
    pub fn new(http: reqwest::Client, providers: &ProvidersConfig) -> Self {
        Self {
            http,
            api_key: providers.weather_api_key.clone(),
            base_url: providers.weather_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current conditions in `city`, e.g. `21.3°C, clear sky`.
    pub async fn get_weather(&self, city: &str) -> String {
        match self.fetch(city).await {
            Ok(payload) => summarize_weather(&payload),
            Err(e) => {
                tracing::warn!(city = %city, error = %e, "Weather lookup failed");
                WEATHER_UNAVAILABLE.to_string()
            }
        }
    }

    async fn fetch(&self, city: &str) -> anyhow::Result<Value> {
        // Error statuses still carry a JSON body without `main`.
        let payload = self
            .http
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .json()
            .await?;
        Ok(payload)
    }
}

/// Summarize an OpenWeatherMap current-weather payload.
pub fn summarize_weather(payload: &Value) -> String {
    let Some(temp) = payload
        .get("main")
        .and_then(|main| main.get("temp"))
        .filter(|temp| !temp.is_null())
    else {
        return WEATHER_UNAVAILABLE.to_string();
    };
    let description = payload["weather"][0]["description"]
        .as_str()
        .unwrap_or("no description");
    format!("{}°C, {}", plain(temp), description)
}

#[async_trait]
impl Tool for WeatherLookup {
    fn name(&self) -> &str {
        "Weather"
    }

    fn description(&self) -> &str {
        "Get weather by city"
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let city = input_arg(&args).ok_or_else(|| anyhow::anyhow!("Missing 'input' argument"))?;
        Ok(self.get_weather(city).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_mock;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(base_url: String) -> WeatherLookup {
        let providers = ProvidersConfig {
            weather_api_key: "owm-key".to_string(),
            weather_base_url: base_url,
            ..ProvidersConfig::default()
        };
        WeatherLookup::new(reqwest::Client::new(), &providers)
    }

    #[test]
    fn summary_uses_temperature_and_description() {
        let payload = json!({
            "main": {"temp": 27.4, "humidity": 40},
            "weather": [{"main": "Clear", "description": "clear sky"}]
        });
        assert_eq!(summarize_weather(&payload), "27.4°C, clear sky");
    }

    #[test]
    fn payload_without_main_is_unavailable() {
        let payload = json!({"cod": "404", "message": "city not found"});
        assert_eq!(summarize_weather(&payload), "Weather info not available.");
    }

    #[test]
    fn payload_without_temperature_is_unavailable() {
        let payload = json!({"main": {"humidity": 70}, "weather": [{"description": "haze"}]});
        assert_eq!(summarize_weather(&payload), WEATHER_UNAVAILABLE);

        let null_temp = json!({"main": {"temp": null}});
        assert_eq!(summarize_weather(&null_temp), WEATHER_UNAVAILABLE);
    }

    #[tokio::test]
    async fn get_weather_queries_metric_units() {
        let router = Router::new().route(
            "/data/2.5/weather",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                if q.get("q").map(String::as_str) == Some("Tunis")
                    && q.get("appid").map(String::as_str) == Some("owm-key")
                    && q.get("units").map(String::as_str) == Some("metric")
                {
                    Json(json!({
                        "main": {"temp": 19},
                        "weather": [{"description": "light rain"}]
                    }))
                } else {
                    Json(json!({"cod": 400}))
                }
            }),
        );
        let base = spawn_mock(router).await;

        assert_eq!(lookup(base).get_weather("Tunis").await, "19°C, light rain");
    }

    #[tokio::test]
    async fn provider_error_body_is_unavailable() {
        let router = Router::new().route(
            "/data/2.5/weather",
            get(|| async {
                (
                    axum::http::StatusCode::UNAUTHORIZED,
                    Json(json!({"cod": 401, "message": "Invalid API key"})),
                )
            }),
        );
        let base = spawn_mock(router).await;

        let tool = lookup(base);
        let out = tool.execute(json!({"input": "Sousse"})).await.expect("tool");
        assert_eq!(out, WEATHER_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        let tool = lookup("http://127.0.0.1:1".to_string());
        assert_eq!(tool.get_weather("Sousse").await, WEATHER_UNAVAILABLE);
    }
}
