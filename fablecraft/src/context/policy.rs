//! How much prior output each stage is shown.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects which earlier stage outputs are passed to the next stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextPolicy {
    /// Every prior output, in order.
    #[default]
    FullTranscript,
    /// Only the immediately preceding output.
    LastOutput,
}

impl fmt::Display for ContextPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullTranscript => write!(f, "full_transcript"),
            Self::LastOutput => write!(f, "last_output"),
        }
    }
}

impl FromStr for ContextPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "full_transcript" | "transcript" => Ok(Self::FullTranscript),
            "last" | "last_output" => Ok(Self::LastOutput),
            _ => Err(ConfigError::InvalidValue {
                key: "context_policy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
