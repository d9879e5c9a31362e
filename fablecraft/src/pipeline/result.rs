//! Result of a completed pipeline run.

use crate::core::StageOutput;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRunResult {
    /// The run ID.
    pub run_id: Uuid,
    /// The idea the run was started with.
    pub idea: String,
    /// Raw text of the final stage.
    pub final_text: String,
    /// Every stage output in execution order.
    pub stages: Vec<StageOutput>,
    /// Total execution time in milliseconds.
    pub duration_ms: f64,
}

impl PipelineRunResult {
    /// Returns the number of stages executed.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the output of the stage with the given role.
    #[must_use]
    pub fn stage(&self, role: &str) -> Option<&StageOutput> {
        self.stages.iter().find(|s| s.role == role)
    }

    /// Returns total tokens across all stages.
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        self.stages.iter().map(StageOutput::total_tokens).sum()
    }
}
