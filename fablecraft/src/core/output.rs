//! Stage output record with factory methods.

use super::StageStatus;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The output of a single stage execution.
///
/// `StageOutput` is built once per stage and never mutated after it has been
/// recorded in a run context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutput {
    /// One-based position of the stage in the pipeline.
    pub index: usize,

    /// Role name of the stage.
    pub role: String,

    /// The status of the stage execution.
    pub status: StageStatus,

    /// The generated text (empty for failed executions).
    #[serde(default)]
    pub text: String,

    /// The prompt that was sent to the generator.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,

    /// Model that produced the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Wall-clock latency of the generation call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,

    /// Prompt token count reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,

    /// Completion token count reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,

    /// Error message (for failed executions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StageOutput {
    /// Creates a successful output carrying generated text.
    #[must_use]
    pub fn ok(index: usize, role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            role: role.into(),
            status: StageStatus::Ok,
            text: text.into(),
            prompt: String::new(),
            model: None,
            latency_ms: None,
            input_tokens: None,
            output_tokens: None,
            error: None,
        }
    }

    /// Creates a failure output with an error message.
    #[must_use]
    pub fn fail(index: usize, role: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            index,
            role: role.into(),
            status: StageStatus::Fail,
            text: String::new(),
            prompt: String::new(),
            model: None,
            latency_ms: None,
            input_tokens: None,
            output_tokens: None,
            error: Some(error.into()),
        }
    }

    /// Attaches the prompt that produced this output.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Attaches the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attaches the call latency.
    #[must_use]
    pub fn with_latency_ms(mut self, latency_ms: f64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    /// Attaches token counts.
    #[must_use]
    pub fn with_tokens(mut self, input: Option<u32>, output: Option<u32>) -> Self {
        self.input_tokens = input;
        self.output_tokens = output;
        self
    }

    /// Returns true if the output indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns total tokens, treating missing counts as zero.
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.unwrap_or(0) + self.output_tokens.unwrap_or(0)
    }

    /// Converts the output to a dictionary suitable for event payloads.
    ///
    /// The generated text and prompt are summarised by length only.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("index".to_string(), serde_json::json!(self.index));
        map.insert("role".to_string(), serde_json::json!(self.role));
        map.insert("status".to_string(), serde_json::json!(self.status.to_string()));
        map.insert("text_chars".to_string(), serde_json::json!(self.text.chars().count()));

        if let Some(ref model) = self.model {
            map.insert("model".to_string(), serde_json::json!(model));
        }
        if let Some(latency) = self.latency_ms {
            map.insert("latency_ms".to_string(), serde_json::json!(latency));
        }
        if self.input_tokens.is_some() || self.output_tokens.is_some() {
            map.insert("total_tokens".to_string(), serde_json::json!(self.total_tokens()));
        }
        if let Some(ref error) = self.error {
            map.insert("error".to_string(), serde_json::json!(error));
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_output() {
        let output = StageOutput::ok(1, "Idea Extractor", "seed");

        assert_eq!(output.status, StageStatus::Ok);
        assert!(output.is_success());
        assert_eq!(output.text, "seed");
        assert!(output.error.is_none());
    }

    #[test]
    fn test_fail_output() {
        let output = StageOutput::fail(2, "Worldbuilding Expert", "timeout");

        assert_eq!(output.status, StageStatus::Fail);
        assert!(!output.is_success());
        assert!(output.text.is_empty());
        assert_eq!(output.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_total_tokens() {
        let output = StageOutput::ok(1, "r", "t").with_tokens(Some(10), None);
        assert_eq!(output.total_tokens(), 10);
    }

    #[test]
    fn test_to_dict_summarises_text() {
        let output = StageOutput::ok(4, "Plot Structure Strategist", "abcde")
            .with_model("gemini-1.5-flash")
            .with_latency_ms(12.5);
        let dict = output.to_dict();

        assert_eq!(dict.get("index"), Some(&serde_json::json!(4)));
        assert_eq!(dict.get("text_chars"), Some(&serde_json::json!(5)));
        assert_eq!(dict.get("model"), Some(&serde_json::json!("gemini-1.5-flash")));
        assert!(!dict.contains_key("total_tokens"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let output = StageOutput::ok(1, "r", "text");
        let json = serde_json::to_value(&output).unwrap();

        assert!(json.get("prompt").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json.get("status"), Some(&serde_json::json!("ok")));
    }
}
