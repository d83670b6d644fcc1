//! Classified error taxonomy for LLM invocations
//!
//! The taxonomy is deliberately coarse: callers act on the kind (retry,
//! fall back, fail) and never on message text. Messages exist for logs
//! only and are redacted where they are built.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// A classified LLM invocation failure.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Connection-level failure reaching the provider
    #[error("transport failure: {0}")]
    Transport(String),

    /// The provider did not answer within the configured timeout
    #[error("request timed out after {duration:?}")]
    Timeout {
        /// The timeout that elapsed
        duration: Duration,
    },

    /// The provider throttled the request (HTTP 429)
    #[error("rate limited: {0}")]
    RateLimit(String),

    /// The provider failed internally (HTTP 5xx)
    #[error("provider server error: {0}")]
    ServerError(String),

    /// A response arrived but its payload is unusable: no text output,
    /// not JSON, or schema-invalid
    #[error("invalid model output: {0}")]
    InvalidModelOutput(String),

    /// Non-retryable provider rejection, e.g. bad credentials or a
    /// malformed request (HTTP 4xx other than 429)
    #[error("api error: {0}")]
    Api(String),

    /// Anything the classifier cannot place
    #[error("unknown failure: {0}")]
    Unknown(String),
}

impl LlmError {
    /// The coarse kind of this error, as exposed to callers and telemetry.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::Transport(_) => ErrorKind::Transport,
            LlmError::Timeout { .. } => ErrorKind::Timeout,
            LlmError::RateLimit(_) => ErrorKind::RateLimit,
            LlmError::ServerError(_) => ErrorKind::ServerError,
            LlmError::InvalidModelOutput(_) => ErrorKind::InvalidModelOutput,
            LlmError::Api(_) => ErrorKind::ApiError,
            LlmError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Whether the transport retry policy may try again after this error.
    ///
    /// Retryable: transport, timeout, rate limit, server error. Everything
    /// else fails immediately without consuming retry budget.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Transport
                | ErrorKind::Timeout
                | ErrorKind::RateLimit
                | ErrorKind::ServerError
        )
    }
}

/// Coarse error classification with stable wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Timeout,
    RateLimit,
    ServerError,
    InvalidModelOutput,
    ApiError,
    Unknown,
}

impl ErrorKind {
    /// Stable snake_case name used in telemetry fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Timeout => "timeout",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::ServerError => "server_error",
            ErrorKind::InvalidModelOutput => "invalid_model_output",
            ErrorKind::ApiError => "api_error",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds_match_taxonomy() {
        assert!(LlmError::Transport("x".into()).is_retryable());
        assert!(
            LlmError::Timeout {
                duration: Duration::from_secs(20)
            }
            .is_retryable()
        );
        assert!(LlmError::RateLimit("x".into()).is_retryable());
        assert!(LlmError::ServerError("x".into()).is_retryable());

        assert!(!LlmError::InvalidModelOutput("x".into()).is_retryable());
        assert!(!LlmError::Api("x".into()).is_retryable());
        assert!(!LlmError::Unknown("x".into()).is_retryable());
    }

    #[test]
    fn test_wire_names_are_stable() {
        assert_eq!(ErrorKind::Transport.as_str(), "transport");
        assert_eq!(ErrorKind::Timeout.as_str(), "timeout");
        assert_eq!(ErrorKind::RateLimit.as_str(), "rate_limit");
        assert_eq!(ErrorKind::ServerError.as_str(), "server_error");
        assert_eq!(
            ErrorKind::InvalidModelOutput.as_str(),
            "invalid_model_output"
        );
        assert_eq!(ErrorKind::ApiError.as_str(), "api_error");
        assert_eq!(ErrorKind::Unknown.as_str(), "unknown");
    }
}
