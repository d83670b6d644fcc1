//! LLM backend abstraction for recipe generation
//!
//! One trait, [`LlmBackend`], stands between the generation pipeline and the
//! network: a single transport attempt in, raw output text or a classified
//! [`LlmError`] out. The transport retry policy lives in
//! [`invoke_with_retry`] as its own function so it can be tested against a
//! scripted backend without a server, and the orchestrator's
//! validation retry stays a separate concern entirely.

mod error;
mod openai;
mod retry;
mod types;

#[cfg(any(test, feature = "test-utils"))]
mod scripted;

pub use error::{ErrorKind, LlmError};
pub use openai::OpenAiBackend;
pub use retry::{
    DEFAULT_BACKOFF_BASE, DEFAULT_MAX_RETRIES, LlmCallFailure, LlmReply, RetryPolicy,
    invoke_with_retry,
};
pub use types::{ChatMessage, LlmBackend, LlmInvocation, Role};

#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedBackend;
