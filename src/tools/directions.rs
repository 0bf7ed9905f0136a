//! Turn-by-turn directions from the home city (Google Directions API).

use async_trait::async_trait;
use serde_json::Value;

use super::html::html_to_text;
use super::{input_arg, plain, Tool};
use crate::config::{HomeConfig, ProvidersConfig};

pub struct DirectionsLookup {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    origin: String,
    description: String,
}

impl DirectionsLookup {
    pub fn new(http: reqwest::Client, providers: &ProvidersConfig, home: &HomeConfig) -> Self {
        Self {
            http,
            api_key: providers.maps_api_key.clone(),
            base_url: providers.maps_base_url.trim_end_matches('/').to_string(),
            origin: home.city.clone(),
            description: format!("Get directions to destination from {}", home.city),
        }
    }

    /// Numbered steps of the first route from `origin` to `destination`.
    pub async fn get_directions(&self, origin: &str, destination: &str) -> String {
        match self.fetch(origin, destination).await {
            Ok(payload) => summarize_directions(&payload),
            Err(e) => {
                tracing::warn!(
                    origin = %origin,
                    destination = %destination,
                    error = %e,
                    "Directions lookup failed"
                );
                format!("Directions not available: {}", e)
            }
        }
    }

    async fn fetch(&self, origin: &str, destination: &str) -> anyhow::Result<Value> {
        let payload = self
            .http
            .get(format!("{}/maps/api/directions/json", self.base_url))
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;
        Ok(payload)
    }
}

/// Render a Directions payload as one numbered line per step.
pub fn summarize_directions(payload: &Value) -> String {
    let Some(status) = payload.get("status").map(plain) else {
        return "Directions not available: missing status".to_string();
    };
    if status != "OK" {
        return format!("Directions not available: {}", status);
    }

    let Some(steps) = payload["routes"][0]["legs"][0]["steps"].as_array() else {
        return "Directions not available: empty route".to_string();
    };

    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let instruction = html_to_text(step["html_instructions"].as_str().unwrap_or(""));
            let distance = plain(&step["distance"]["text"]);
            format!("{}. {} ({})", i + 1, instruction, distance)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Tool for DirectionsLookup {
    fn name(&self) -> &str {
        "Directions"
    }

    fn description(&self) -> &str {
        &self.description
    }

    /// The argument is the destination; the origin is the home city.
    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let destination =
            input_arg(&args).ok_or_else(|| anyhow::anyhow!("Missing 'input' argument"))?;
        Ok(self.get_directions(&self.origin, destination).await)
    }
}
