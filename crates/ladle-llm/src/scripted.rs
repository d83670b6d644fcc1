//! Scripted in-memory backend for tests
//!
//! Replays a fixed sequence of replies and records every invocation, so
//! tests can assert call counts and prompt contents without a server.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{LlmBackend, LlmInvocation};

/// An [`LlmBackend`] that replays a scripted reply sequence.
///
/// Each `invoke` pops the next scripted reply; an exhausted script yields
/// [`LlmError::Unknown`]. Invocations are recorded in order and can be
/// inspected afterwards.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    invocations: Mutex<Vec<LlmInvocation>>,
}

impl ScriptedBackend {
    /// Create a backend that replays `script` in order.
    #[must_use]
    pub fn new(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Number of invocations received so far.
    #[must_use]
    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    /// Snapshot of all recorded invocations, in order.
    #[must_use]
    pub fn invocations(&self) -> Vec<LlmInvocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn invoke(&self, invocation: &LlmInvocation) -> Result<String, LlmError> {
        self.invocations.lock().unwrap().push(invocation.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Unknown("scripted backend exhausted".to_string())))
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}
