//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use crate::llm::{
    ChatMessage, ChatResponse, CompletionOptions, LlmClient, LlmError, ToolSchema,
};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_mock(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{}", addr)
}

/// A recorded `chat_completion` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tool_names: Vec<String>,
    pub temperature: Option<f32>,
}

/// LLM client replaying queued responses in order.
pub struct ScriptedLlm {
    responses: Mutex<VecDeque<Result<ChatResponse, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedLlm {
    pub fn new(responses: Vec<ChatResponse>) -> Arc<Self> {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Queue responses where `Err` entries become API errors.
    pub fn with_results(results: Vec<Result<ChatResponse, String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Answer a single call with `text`.
    pub fn text(text: &str) -> Arc<Self> {
        Self::new(vec![ChatResponse {
            content: Some(text.to_string()),
            tool_calls: None,
        }])
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn models(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
        options: CompletionOptions,
    ) -> Result<ChatResponse, LlmError> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            model: model.to_string(),
            messages: messages.to_vec(),
            tool_names: tools
                .unwrap_or_default()
                .iter()
                .map(|t| t.name.clone())
                .collect(),
            temperature: options.temperature,
        });

        let next = self.responses.lock().expect("responses lock").pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LlmError::Api(message)),
            None => Err(LlmError::Api("script exhausted".to_string())),
        }
    }
}
