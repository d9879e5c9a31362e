//! Scripted generator for tests and offline runs.

use super::{LlmResponse, TextGenerator};
use crate::errors::ProviderError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A generator that replays fixed responses in order.
///
/// Every call is recorded so tests can inspect the prompts and contexts the
/// pipeline produced. When the script runs out the call fails with
/// [`ProviderError::Exhausted`].
#[derive(Debug)]
pub struct ScriptedGenerator {
    responses: Vec<String>,
    echo_mode: bool,
    failure: Option<(usize, ProviderError)>,
    call_count: AtomicUsize,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    /// Creates a generator returning `responses` one per call.
    #[must_use]
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            echo_mode: false,
            failure: None,
            call_count: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a generator that returns each prompt unchanged.
    #[must_use]
    pub fn echo() -> Self {
        Self {
            echo_mode: true,
            ..Self::new(Vec::new())
        }
    }

    /// Makes the call at one-based position `call` fail with `error`.
    #[must_use]
    pub fn failing_on(mut self, call: usize, error: ProviderError) -> Self {
        self.failure = Some((call, error));
        self
    }

    /// Returns the call count.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Returns every `(prompt, context)` pair received, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    /// Resets the mock.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        self.calls.lock().clear();
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, context: &str) -> Result<LlmResponse, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.lock().push((prompt.to_string(), context.to_string()));

        if let Some((fail_at, ref error)) = self.failure {
            if fail_at == call {
                return Err(error.clone());
            }
        }

        let content = if self.echo_mode {
            prompt.to_string()
        } else {
            self.responses
                .get(call - 1)
                .cloned()
                .ok_or(ProviderError::Exhausted { calls: call - 1 })?
        };

        Ok(LlmResponse::new(content, "scripted", self.name()))
    }
}
