//! Trip dispatch: direct chat or tool loop.

use std::sync::Arc;

use crate::api::types::TripRequest;
use crate::config::Config;
use crate::llm::{ChatSession, GeminiClient, LlmClient, LlmError};
use crate::tools::ToolRegistry;

use super::agent_loop::Agent;
use super::prompt::build_route_prompt;

/// Turns trip requests into model answers. Built once at startup and
/// shared by every request; holds no per-request state.
pub struct Dispatcher {
    llm: Arc<dyn LlmClient>,
    agent: Arc<Agent>,
    model: String,
}

impl Dispatcher {
    pub fn new(config: &Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        let agent = Agent::new(
            Arc::clone(&llm),
            tools,
            config.model_name.clone(),
            config.max_iterations,
        );
        Self {
            llm,
            agent: Arc::new(agent),
            model: config.model_name.clone(),
        }
    }

    /// Gemini-backed dispatcher with the standard lookup tools.
    pub fn from_config(config: &Config) -> Self {
        let llm = Arc::new(GeminiClient::new(
            config.google_api_key.clone(),
            config.gemini_base_url.clone(),
        ));
        Self::new(config, llm, ToolRegistry::new(config))
    }

    /// Send the trip prompt straight to a fresh chat and return its text.
    pub async fn direct(&self, trip: &TripRequest) -> Result<String, LlmError> {
        let prompt = trip_prompt(trip);
        tracing::debug!(prompt = %prompt, "Built route prompt");

        let mut chat = ChatSession::start(Arc::clone(&self.llm), self.model.clone());
        let reply = chat.send_message(&prompt).await?;
        Ok(reply.text)
    }

    /// Run the tool loop on the trip prompt.
    ///
    /// The loop runs on its own task; the caller only awaits its completion.
    pub async fn with_tools(&self, trip: &TripRequest) -> anyhow::Result<String> {
        let prompt = trip_prompt(trip);
        tracing::debug!(prompt = %prompt, "Built route prompt");

        let agent = Arc::clone(&self.agent);
        let run = tokio::spawn(async move { agent.run(&prompt).await })
            .await
            .map_err(|e| anyhow::anyhow!("Agent task failed: {}", e))??;

        tracing::info!(
            iterations = run.iterations,
            tool_calls = run.tool_calls,
            "Agent run completed"
        );
        Ok(run.answer)
    }
}

fn trip_prompt(trip: &TripRequest) -> String {
    build_route_prompt(
        &trip.origin,
        &trip.destination,
        &trip.vehicle_type,
        &trip.departure_time,
    )
}
