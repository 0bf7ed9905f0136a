//! Lookup tools the agent can call.
//!
//! Every tool takes a single text argument and answers with text. Provider
//! failures are reported inside that text instead of as errors, so one bad
//! lookup never aborts the agent loop.

mod directions;
mod html;
mod traffic;
mod weather;

pub use directions::{summarize_directions, DirectionsLookup};
pub use traffic::{summarize_traffic, TrafficLookup};
pub use weather::{summarize_weather, WeatherLookup, WEATHER_UNAVAILABLE};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::Config;
use crate::llm::ToolSchema;

/// A capability the model can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "input": {
                    "type": "string",
                    "description": "Text argument for the lookup"
                }
            },
            "required": ["input"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// The explicit, ordered list of tools offered to the model.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Register the weather, traffic and directions lookups.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::new();
        let tools: Vec<Arc<dyn Tool>> = vec![
            Arc::new(WeatherLookup::new(http.clone(), &config.providers)),
            Arc::new(TrafficLookup::new(
                http.clone(),
                &config.providers,
                &config.home,
            )),
            Arc::new(DirectionsLookup::new(http, &config.providers, &config.home)),
        ];
        Self::with_tools(tools)
    }

    pub fn with_tools(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|t| ToolSchema {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect()
    }

    /// Run the tool called `name`.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tracing::info!(tool = %name, "Executing tool");
        tool.execute(args).await
    }
}

/// The text argument of a call: `{"input": "..."}` or a bare JSON string.
pub(crate) fn input_arg(args: &Value) -> Option<&str> {
    args.get("input")
        .and_then(Value::as_str)
        .or_else(|| args.as_str())
}

/// Render a JSON scalar without quoting strings.
pub(crate) fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
