//! Completion-service client abstraction.
//!
//! The pipeline talks to the language model through the [`LlmClient`] trait so
//! tests can substitute a scripted implementation. The production
//! implementation is [`OpenAiClient`].

mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors from the completion service.
///
/// These are never absorbed by the pipeline; they propagate to the request
/// boundary and surface as a server error.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure reaching the completion service
    #[error("HTTP error calling completion service: {0}")]
    Http(String),

    /// The completion service answered with a non-success status
    #[error("Completion service returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Failed to decode completion response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Http(err.to_string())
    }
}

/// Role of a chat message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Minimal chat-completion client.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send an ordered list of messages and return the first choice's message
    /// content. The provider may legitimately return no text, hence the
    /// `Option`.
    async fn chat_completion(&self, messages: &[ChatMessage]) -> Result<Option<String>, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_has_user_role() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::user("hi")).expect("serialize");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn error_display_includes_status() {
        let err = LlmError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("429"));
        assert!(text.contains("rate limited"));
    }
}
