//! Core agent loop implementation.

use std::sync::Arc;

use crate::llm::{ChatMessage, CompletionOptions, LlmClient, ToolCall};
use crate::tools::ToolRegistry;
use crate::util::truncate_with_marker;

use super::prompt::build_system_prompt;

/// Outcome of one agent run.
#[derive(Debug, Clone)]
pub struct AgentRun {
    /// Final answer produced by the model
    pub answer: String,

    /// Number of model calls made
    pub iterations: usize,

    /// Number of tool calls executed
    pub tool_calls: usize,
}

/// Tool-using route agent.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_iterations: usize,
}

impl Agent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        model: impl Into<String>,
        max_iterations: usize,
    ) -> Self {
        Self {
            llm,
            tools,
            model: model.into(),
            max_iterations,
        }
    }

    /// Run the loop on `prompt` until the model answers without tool calls.
    pub async fn run(&self, prompt: &str) -> anyhow::Result<AgentRun> {
        let mut messages = vec![
            ChatMessage::system(build_system_prompt(&self.tools)),
            ChatMessage::user(prompt),
        ];

        let tool_schemas = self.tools.get_tool_schemas();
        let options = CompletionOptions {
            temperature: Some(0.0),
        };
        let mut executed = 0;

        for iteration in 0..self.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(&self.model, &messages, Some(tool_schemas.as_slice()), options)
                .await?;

            if let Some(tool_calls) = response.tool_calls.filter(|c| !c.is_empty()) {
                messages.push(ChatMessage::assistant_with_calls(
                    response.content,
                    tool_calls.clone(),
                ));

                for tool_call in &tool_calls {
                    tracing::debug!(
                        tool = %tool_call.function.name,
                        args = %tool_call.function.arguments,
                        "Calling tool"
                    );

                    let result_str = match self.execute_tool_call(tool_call).await {
                        Ok(output) => output,
                        Err(e) => format!("Error: {}", e),
                    };

                    tracing::debug!(
                        tool = %tool_call.function.name,
                        result = %truncate_with_marker(&result_str, 1000, "... [truncated]"),
                        "Tool result"
                    );

                    messages.push(ChatMessage::tool_result(tool_call, result_str));
                    executed += 1;
                }

                continue;
            }

            // No tool calls - this is the final response
            if let Some(content) = response.content {
                return Ok(AgentRun {
                    answer: content,
                    iterations: iteration + 1,
                    tool_calls: executed,
                });
            }

            return Err(anyhow::anyhow!("LLM returned empty response"));
        }

        Err(anyhow::anyhow!(
            "Max iterations ({}) reached without completion",
            self.max_iterations
        ))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .map_err(|e| anyhow::anyhow!("Invalid arguments for {}: {}", tool_call.function.name, e))?;

        self.tools.execute(&tool_call.function.name, args).await
    }
}
