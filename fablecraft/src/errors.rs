//! Error types for the fablecraft pipeline.
//!
//! The taxonomy is intentionally flat: validation problems are caught when a
//! pipeline is built, provider problems surface while a run is in flight and
//! are wrapped with the stage that was executing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for fablecraft operations.
#[derive(Debug, Error)]
pub enum FablecraftError {
    /// A pipeline validation error occurred.
    #[error("{0}")]
    Validation(#[from] PipelineValidationError),

    /// A stage failed while calling the text-generation service.
    #[error("Stage {index} ({role}) failed: {source}")]
    Stage {
        /// One-based position of the failing stage.
        index: usize,
        /// Role name of the failing stage.
        role: String,
        /// The underlying provider error.
        #[source]
        source: ProviderError,
    },
}

impl FablecraftError {
    /// Wraps a provider error with the stage that produced it.
    #[must_use]
    pub fn stage(index: usize, role: impl Into<String>, source: ProviderError) -> Self {
        Self::Stage {
            index,
            role: role.into(),
            source,
        }
    }

    /// Returns the one-based index of the failing stage, if any.
    #[must_use]
    pub fn stage_index(&self) -> Option<usize> {
        match self {
            Self::Stage { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Errors raised by a text-generation provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// No API key was configured.
    #[error("API key not set (expected `api_key` or `GEMINI_API_KEY`)")]
    MissingApiKey,

    /// The HTTP transport failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    ResponseParsing(String),

    /// The service returned no text candidates.
    #[error("Response contained no text")]
    EmptyResponse,

    /// A scripted generator ran out of responses.
    #[error("Scripted generator exhausted after {calls} calls")]
    Exhausted {
        /// Number of calls served before running out.
        calls: usize,
    },
}

impl ProviderError {
    /// Converts to a dictionary representation for event payloads.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let kind = match self {
            Self::MissingApiKey => "MissingApiKey",
            Self::Http(_) => "Http",
            Self::Api { .. } => "Api",
            Self::ResponseParsing(_) => "ResponseParsing",
            Self::EmptyResponse => "EmptyResponse",
            Self::Exhausted { .. } => "Exhausted",
        };

        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(kind));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        if let Self::Api { status, .. } = self {
            map.insert("status".to_string(), serde_json::json!(status));
        }
        map
    }
}

/// Metadata about a validation error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContractErrorInfo {
    /// Error code (e.g., "PIPELINE-EMPTY").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
}

impl ContractErrorInfo {
    /// Creates a new contract error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }
}

/// Error raised when pipeline validation fails.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// The error message.
    pub message: String,
    /// The stage roles involved in the error.
    pub stages: Vec<String>,
    /// Optional contract error info.
    pub error_info: Option<ContractErrorInfo>,
}

impl PipelineValidationError {
    /// Creates a new pipeline validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
            error_info: None,
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }

    /// Sets the contract error info.
    #[must_use]
    pub fn with_error_info(mut self, info: ContractErrorInfo) -> Self {
        self.error_info = Some(info);
        self
    }

    /// Returns the error code, if one was attached.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|i| i.code.as_str())
    }
}

/// Error raised when configuration values are invalid.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be interpreted.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// The variable name.
        key: String,
        /// The rejected value.
        value: String,
    },
}
