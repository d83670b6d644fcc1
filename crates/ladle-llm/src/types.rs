//! Core types for the LLM backend abstraction

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LlmError;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-level instructions
    System,
    /// User input
    User,
    /// Assistant response
    Assistant,
}

/// A single message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Plain UTF-8 message text
    pub content: String,
}

impl ChatMessage {
    /// Create a new message
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Input to a single backend invocation.
///
/// `Clone` so the retry loop can re-issue it and test doubles can record it.
#[derive(Debug, Clone)]
pub struct LlmInvocation {
    /// Model identifier to request
    pub model: String,
    /// Ordered conversation messages
    pub messages: Vec<ChatMessage>,
    /// Strict JSON Schema the response must conform to
    pub response_schema: Value,
    /// Response token ceiling
    pub max_output_tokens: u32,
    /// Timeout for this attempt
    pub timeout: Duration,
}

impl LlmInvocation {
    /// Create a new invocation
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
        response_schema: Value,
        max_output_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            response_schema,
            max_output_tokens,
            timeout,
        }
    }

    /// Concatenated text of all user messages, for prompt assertions in
    /// tests and for nothing else. Never log this.
    #[must_use]
    pub fn user_text(&self) -> String {
        self.messages
            .iter()
            .filter(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A pluggable LLM transport.
///
/// One call to [`invoke`](LlmBackend::invoke) is one transport attempt:
/// implementations do not retry internally. The retry policy is applied on
/// top by [`invoke_with_retry`](crate::invoke_with_retry), which keeps the
/// two concerns independently testable.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Perform one transport attempt and return the raw output text.
    ///
    /// # Errors
    ///
    /// Returns a classified [`LlmError`]; the caller decides whether the
    /// kind is worth retrying.
    async fn invoke(&self, invocation: &LlmInvocation) -> Result<String, LlmError>;

    /// Short provider label for logs
    fn provider_name(&self) -> &str;
}

/// A shared backend is a backend, so one transport can serve several
/// owners (and tests can keep a handle on a backend they hand off).
#[async_trait]
impl<T: LlmBackend + ?Sized> LlmBackend for std::sync::Arc<T> {
    async fn invoke(&self, invocation: &LlmInvocation) -> Result<String, LlmError> {
        self.as_ref().invoke(invocation).await
    }

    fn provider_name(&self) -> &str {
        self.as_ref().provider_name()
    }
}
