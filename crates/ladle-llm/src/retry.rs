//! Bounded transport retry with exponential backoff
//!
//! An explicit little state machine: attempt counter, classified error,
//! doubled backoff. Both outcomes carry the consumed retry count so the
//! caller can report it; exhausting the budget re-raises the last
//! classified error rather than inventing a new one.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::types::{LlmBackend, LlmInvocation};

/// Default transport retry budget (2 retries, so 3 attempts total)
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default base backoff delay; doubles after each failed attempt
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(250);

/// Transport retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt; 2 means at most 3 attempts
    pub max_retries: u32,
    /// First backoff delay; the n-th backoff is `backoff_base * 2^n`
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl RetryPolicy {
    /// A policy that never sleeps, for tests.
    #[must_use]
    pub fn without_backoff(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_base: Duration::ZERO,
        }
    }
}

/// Successful adapter call: the raw output text plus the transport retries
/// consumed getting it.
#[derive(Debug, Clone)]
pub struct LlmReply {
    /// Raw output text from the backend
    pub text: String,
    /// Transport retries consumed (0 when the first attempt succeeded)
    pub transport_retries: u32,
}

/// Failed adapter call: the last classified error plus the transport
/// retries consumed before giving up.
#[derive(Debug, Error)]
#[error("{error} (after {transport_retries} transport retries)")]
pub struct LlmCallFailure {
    /// The classified error that ended the attempt sequence
    pub error: LlmError,
    /// Transport retries consumed before failing
    pub transport_retries: u32,
}

/// Invoke a backend with the transport retry policy applied.
///
/// Retryable kinds (transport, timeout, rate limit, server error) are
/// retried up to `policy.max_retries` times with exponential backoff
/// starting at `policy.backoff_base` and doubling per attempt. Non-retryable
/// kinds fail immediately without consuming retry budget.
///
/// # Errors
///
/// Returns [`LlmCallFailure`] wrapping the last classified error once the
/// budget is exhausted or a non-retryable error occurs.
pub async fn invoke_with_retry(
    backend: &dyn LlmBackend,
    invocation: &LlmInvocation,
    policy: &RetryPolicy,
) -> Result<LlmReply, LlmCallFailure> {
    let mut attempt: u32 = 0;

    loop {
        match backend.invoke(invocation).await {
            Ok(text) => {
                debug!(
                    provider = backend.provider_name(),
                    transport_retries = attempt,
                    "backend invocation succeeded"
                );
                return Ok(LlmReply {
                    text,
                    transport_retries: attempt,
                });
            }
            Err(error) => {
                if !error.is_retryable() || attempt == policy.max_retries {
                    return Err(LlmCallFailure {
                        error,
                        transport_retries: attempt,
                    });
                }

                warn!(
                    provider = backend.provider_name(),
                    attempt = attempt + 1,
                    error = %error,
                    "retryable backend failure, backing off"
                );
                let backoff = policy.backoff_base * 2u32.saturating_pow(attempt);
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
