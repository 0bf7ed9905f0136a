//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{json, Map, Value};

use crate::util::truncate_with_marker;

use super::{
    ChatMessage, ChatResponse, CompletionOptions, FunctionCall, LlmClient, LlmError, Role,
    ToolCall, ToolSchema,
};

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY: usize = 500;

/// LLM client backed by the Gemini REST API.
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(model)
        )
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
        options: CompletionOptions,
    ) -> Result<ChatResponse, LlmError> {
        let body = build_request_body(messages, tools, options);

        tracing::debug!(
            model = %model,
            messages = messages.len(),
            tools = tools.map_or(0, |t| t.len()),
            "Sending generateContent request"
        );

        let response = self
            .http_client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Gemini request failed");
            return Err(LlmError::Api(format!(
                "{} - {}",
                status,
                truncate_with_marker(&error_text, MAX_ERROR_BODY, "... (truncated)")
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| LlmError::Json(e.to_string()))?;

        parse_response(&payload)
    }
}

/// Translate the conversation into a `generateContent` request body.
fn build_request_body(
    messages: &[ChatMessage],
    tools: Option<&[ToolSchema]>,
    options: CompletionOptions,
) -> Value {
    let mut system_parts = Vec::new();
    let mut contents: Vec<Value> = Vec::new();

    for message in messages {
        match message.role {
            Role::System => {
                if let Some(text) = &message.content {
                    system_parts.push(json!({ "text": text }));
                }
            }
            Role::User => {
                contents.push(json!({
                    "role": "user",
                    "parts": [{ "text": message.content.clone().unwrap_or_default() }]
                }));
            }
            Role::Assistant => {
                let mut parts = Vec::new();
                if let Some(text) = message.content.as_deref().filter(|t| !t.is_empty()) {
                    parts.push(json!({ "text": text }));
                }
                for call in message.tool_calls.iter().flatten() {
                    let args: Value = serde_json::from_str(&call.function.arguments)
                        .unwrap_or_else(|_| Value::Object(Map::new()));
                    parts.push(json!({
                        "functionCall": { "name": call.function.name, "args": args }
                    }));
                }
                contents.push(json!({ "role": "model", "parts": parts }));
            }
            Role::Tool => {
                let part = json!({
                    "functionResponse": {
                        "name": message.name.clone().unwrap_or_default(),
                        "response": { "content": message.content.clone().unwrap_or_default() }
                    }
                });
                // Responses to one model turn go back together in a single turn.
                let continues_responses = contents
                    .last()
                    .and_then(|last| last["parts"].as_array())
                    .and_then(|parts| parts.first())
                    .is_some_and(|p| p.get("functionResponse").is_some());
                if continues_responses {
                    if let Some(parts) = contents
                        .last_mut()
                        .and_then(|last| last["parts"].as_array_mut())
                    {
                        parts.push(part);
                    }
                } else {
                    contents.push(json!({ "role": "user", "parts": [part] }));
                }
            }
        }
    }

    let mut body = json!({ "contents": contents });

    if !system_parts.is_empty() {
        body["systemInstruction"] = json!({ "parts": system_parts });
    }

    if let Some(tools) = tools.filter(|t| !t.is_empty()) {
        let declarations: Vec<Value> = tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "parameters": t.parameters,
                })
            })
            .collect();
        body["tools"] = json!([{ "functionDeclarations": declarations }]);
    }

    if let Some(temperature) = options.temperature {
        body["generationConfig"] = json!({ "temperature": temperature });
    }

    body
}

/// Extract text and function calls from the first candidate.
fn parse_response(payload: &Value) -> Result<ChatResponse, LlmError> {
    let Some(candidate) = payload["candidates"].as_array().and_then(|c| c.first()) else {
        if let Some(reason) = payload["promptFeedback"]["blockReason"].as_str() {
            return Err(LlmError::Api(format!("Prompt blocked: {}", reason)));
        }
        return Err(LlmError::EmptyResponse);
    };

    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for part in candidate["content"]["parts"].as_array().into_iter().flatten() {
        if let Some(t) = part["text"].as_str() {
            text.push_str(t);
        } else if let Some(call) = part.get("functionCall") {
            let name = call["name"]
                .as_str()
                .ok_or_else(|| LlmError::Json("functionCall without name".to_string()))?;
            let args = call.get("args").cloned().unwrap_or_else(|| json!({}));
            tool_calls.push(ToolCall {
                id: format!("call_{}", tool_calls.len()),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: args.to_string(),
                },
            });
        }
    }

    Ok(ChatResponse {
        content: (!text.is_empty()).then_some(text),
        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
    })
}
