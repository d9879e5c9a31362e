//! Provider response type.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text produced by a single generator call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated text.
    pub content: String,
    /// Model that produced the text.
    pub model: String,
    /// Provider name.
    pub provider: String,
    /// Prompt token count, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,
    /// Completion token count, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,
    /// Why generation stopped, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl LlmResponse {
    /// Creates a response with only content, model and provider set.
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        model: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            provider: provider.into(),
            input_tokens: None,
            output_tokens: None,
            finish_reason: None,
        }
    }

    /// Returns total tokens.
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.unwrap_or(0) + self.output_tokens.unwrap_or(0)
    }

    /// Converts to span attributes.
    #[must_use]
    pub fn to_otel_attributes(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("llm.model".to_string(), serde_json::json!(self.model));
        map.insert("llm.provider".to_string(), serde_json::json!(self.provider));
        if let Some(t) = self.input_tokens {
            map.insert("llm.input_tokens".to_string(), serde_json::json!(t));
        }
        if let Some(t) = self.output_tokens {
            map.insert("llm.output_tokens".to_string(), serde_json::json!(t));
        }
        map.insert("llm.total_tokens".to_string(), serde_json::json!(self.total_tokens()));
        if let Some(ref reason) = self.finish_reason {
            map.insert("llm.finish_reason".to_string(), serde_json::json!(reason));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_tokens() {
        let mut response = LlmResponse::new("hi", "m", "p");
        assert_eq!(response.total_tokens(), 0);

        response.input_tokens = Some(12);
        response.output_tokens = Some(30);
        assert_eq!(response.total_tokens(), 42);
    }

    #[test]
    fn test_otel_attributes() {
        let attrs = LlmResponse::new("hi", "gemini-1.5-flash", "gemini").to_otel_attributes();

        assert_eq!(attrs.get("llm.model"), Some(&serde_json::json!("gemini-1.5-flash")));
        assert_eq!(attrs.get("llm.total_tokens"), Some(&serde_json::json!(0)));
        assert!(!attrs.contains_key("llm.input_tokens"));
    }
}
