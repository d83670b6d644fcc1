//! OpenAI-compatible chat-completions backend
//!
//! Speaks the `chat/completions` dialect with a strict `json_schema`
//! response format, so any OpenAI-compatible provider can serve as the
//! remote generator. One `invoke` is exactly one HTTP round trip; the
//! retry policy is layered on by the caller.

use std::time::Duration;

use async_trait::async_trait;
use ladle_config::{ConfigError, RemoteConfig};
use ladle_redaction::redact;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::LlmError;
use crate::types::{ChatMessage, LlmBackend, LlmInvocation, Role};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Schema name advertised in the strict response format
const RESPONSE_SCHEMA_NAME: &str = "recipe";

/// HTTP backend for an OpenAI-compatible API.
///
/// No `Debug` derive: the struct holds the API credential.
#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiBackend {
    /// Create a backend against `base_url` with an already-resolved key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>, api_key: String) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .use_rustls_tls()
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Create a backend from remote configuration plus the resolved key.
    ///
    /// The model, token ceiling, and timeout ride in each
    /// [`LlmInvocation`]; only the endpoint and credential are fixed at
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the HTTP client cannot be
    /// constructed.
    pub fn from_config(remote: &RemoteConfig, api_key: String) -> Result<Self, ConfigError> {
        Self::new(remote.base_url.clone(), api_key)
    }

    fn convert_messages(messages: &[ChatMessage]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|message| WireMessage {
                role: match message.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: message.content.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn invoke(&self, invocation: &LlmInvocation) -> Result<String, LlmError> {
        debug!(
            provider = "openai",
            model = %invocation.model,
            max_output_tokens = invocation.max_output_tokens,
            timeout_secs = invocation.timeout.as_secs(),
            "invoking chat completions"
        );

        let body = ChatCompletionRequest {
            model: invocation.model.clone(),
            messages: Self::convert_messages(&invocation.messages),
            max_tokens: invocation.max_output_tokens,
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: RESPONSE_SCHEMA_NAME,
                    strict: true,
                    schema: invocation.response_schema.clone(),
                },
            },
        };

        let url = format!("{}{CHAT_COMPLETIONS_PATH}", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(invocation.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_request_error(&e, invocation.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::InvalidModelOutput(redact(&format!(
                "failed to decode completion body: {e}"
            )))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                LlmError::InvalidModelOutput("response contained no output text".to_string())
            })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

/// Map a failed send into the taxonomy: timeouts and connection failures
/// are retryable; anything else the transport reports is unclassifiable
/// and treated as non-retryable.
fn classify_request_error(error: &reqwest::Error, timeout: Duration) -> LlmError {
    if error.is_timeout() {
        return LlmError::Timeout { duration: timeout };
    }
    if error.is_connect() {
        return LlmError::Transport(redact(&format!("connection failed: {error}")));
    }
    LlmError::Unknown(redact(&format!("request failed: {error}")))
}

/// Map a non-success HTTP status into the taxonomy.
///
/// 429 is retryable rate limiting, 5xx is a retryable provider outage,
/// and every other 4xx is a non-retryable rejection.
fn classify_status(status: StatusCode) -> LlmError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            LlmError::RateLimit(format!("provider rate limited the request: {status}"))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Api(format!("provider rejected credentials: {status}"))
        }
        s if s.is_server_error() => {
            LlmError::ServerError(format!("provider returned server error: {status}"))
        }
        _ => LlmError::Api(format!("provider rejected the request: {status}")),
    }
}

/// OpenAI-compatible request message
#[derive(Debug, Clone, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// Chat-completions request body
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    response_format: ResponseFormat,
}

/// Strict structured-output format selector
#[derive(Debug, Clone, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Clone, Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    strict: bool,
    schema: Value,
}

/// Chat-completions response body
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: WireResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
}
