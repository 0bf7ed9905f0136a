//! Started chat conversations.

use std::sync::Arc;

use super::{ChatMessage, CompletionOptions, LlmClient, LlmError};

/// Text reply to one message in a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}

/// A chat conversation against one model. History grows with every
/// exchanged message; sessions are cheap and meant to be short-lived.
pub struct ChatSession {
    client: Arc<dyn LlmClient>,
    model: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start an empty chat against `model`.
    pub fn start(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            history: Vec::new(),
        }
    }

    /// Send a user message and wait for the model's text reply.
    pub async fn send_message(&mut self, text: &str) -> Result<ChatReply, LlmError> {
        self.history.push(ChatMessage::user(text));

        let response = self
            .client
            .chat_completion(
                &self.model,
                &self.history,
                None,
                CompletionOptions::default(),
            )
            .await;

        let content = match response {
            Ok(r) => r.content,
            Err(e) => {
                self.history.pop();
                return Err(e);
            }
        };

        let Some(text) = content else {
            self.history.pop();
            return Err(LlmError::EmptyResponse);
        };

        self.history.push(ChatMessage::assistant(text.clone()));
        Ok(ChatReply { text })
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatResponse, Role};
    use crate::test_support::ScriptedLlm;

    #[tokio::test]
    async fn send_message_records_history() {
        let llm = ScriptedLlm::new(vec![ChatResponse {
            content: Some("Take the A1.".to_string()),
            tool_calls: None,
        }]);
        let mut session = ChatSession::start(llm.clone(), "gemini-1.5-flash");

        let reply = session.send_message("Sousse to Tunis").await.expect("reply");

        assert_eq!(reply.text, "Take the A1.");
        let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(llm.models(), vec!["gemini-1.5-flash".to_string()]);
    }

    #[tokio::test]
    async fn failed_send_leaves_history_untouched() {
        let llm = ScriptedLlm::new(vec![ChatResponse::default()]);
        let mut session = ChatSession::start(llm, "gemini-1.5-flash");

        let err = session.send_message("hello").await.expect_err("empty");

        assert!(matches!(err, LlmError::EmptyResponse));
        assert!(session.history().is_empty());
    }
}
