//! Traffic flow near the home point (TomTom flow segment data).

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{plain, Tool};
use crate::config::{HomeConfig, ProvidersConfig};

pub struct TrafficLookup {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    lat: f64,
    lon: f64,
    description: String,
}

impl TrafficLookup {
    pub fn new(http: reqwest::Client, providers: &ProvidersConfig, home: &HomeConfig) -> Self {
        Self {
            http,
            api_key: providers.traffic_api_key.clone(),
            base_url: providers.traffic_base_url.trim_end_matches('/').to_string(),
            lat: home.lat,
            lon: home.lon,
            description: format!("Get traffic near {}", home.city),
        }
    }

    /// Flow on the road segment closest to (`lat`, `lon`).
    pub async fn get_traffic(&self, lat: f64, lon: f64) -> String {
        match self.fetch(lat, lon).await {
            Ok(payload) => summarize_traffic(&payload),
            Err(e) => {
                tracing::warn!(lat, lon, error = %e, "Traffic lookup failed");
                format!("Traffic data error: {}", e)
            }
        }
    }

    async fn fetch(&self, lat: f64, lon: f64) -> anyhow::Result<Value> {
        let point = format!("{},{}", lat, lon);
        let payload = self
            .http
            .get(format!(
                "{}/traffic/services/4/flowSegmentData/absolute/10/json",
                self.base_url
            ))
            .query(&[("point", point.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?
            .json()
            .await?;
        Ok(payload)
    }
}

/// Summarize a TomTom `flowSegmentData` payload.
pub fn summarize_traffic(payload: &Value) -> String {
    match payload.get("flowSegmentData") {
        Some(flow) => format!(
            "Traffic speed: {} km/h on road class {}",
            plain(&flow["currentSpeed"]),
            plain(&flow["frc"])
        ),
        None => format!("Traffic data error: {}", payload),
    }
}

#[async_trait]
impl Tool for TrafficLookup {
    fn name(&self) -> &str {
        "Traffic"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "input": {
                    "type": "string",
                    "description": "Ignored; traffic is read at a fixed point"
                }
            }
        })
    }

    /// The argument is ignored: traffic is always read at the home point.
    async fn execute(&self, _args: Value) -> anyhow::Result<String> {
        Ok(self.get_traffic(self.lat, self.lon).await)
    }
}
