//! Text-generation providers.
//!
//! The pipeline only ever sees [`TextGenerator`]: one prompt and one context
//! block in, one piece of text out. Concrete providers live behind it so the
//! ordering and rendering logic can be exercised without a network.

#[cfg(feature = "gemini")]
mod gemini;
mod response;
mod scripted;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiGenerator, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use response::LlmResponse;
pub use scripted::ScriptedGenerator;

use crate::errors::ProviderError;
use async_trait::async_trait;

/// Minimal capability interface over a remote text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the provider name used in logs and events.
    fn name(&self) -> &str;

    /// Generates text for a stage prompt.
    ///
    /// `context` holds the rendered output of earlier stages and may be empty.
    async fn generate(&self, prompt: &str, context: &str) -> Result<LlmResponse, ProviderError>;
}
