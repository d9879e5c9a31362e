//! Pipeline builder with validation.

use super::OutlinePipeline;
use crate::context::ContextPolicy;
use crate::errors::PipelineValidationError;
use crate::events::{EventSink, LoggingEventSink};
use crate::providers::TextGenerator;
use crate::stages::{StageCatalog, StageDefinition};
use std::sync::Arc;

/// Builder for creating validated outline pipelines.
///
/// Without an explicit stage list the built-in seven-stage fantasy catalog
/// is used.
pub struct PipelineBuilder {
    generator: Arc<dyn TextGenerator>,
    stages: Option<Vec<StageDefinition>>,
    policy: ContextPolicy,
    event_sink: Arc<dyn EventSink>,
}

impl PipelineBuilder {
    /// Creates a new builder around a generator.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            stages: None,
            policy: ContextPolicy::default(),
            event_sink: Arc::new(LoggingEventSink),
        }
    }

    /// Replaces the stage list. Order is kept exactly as given.
    #[must_use]
    pub fn stages(mut self, stages: Vec<StageDefinition>) -> Self {
        self.stages = Some(stages);
        self
    }

    /// Appends one stage, starting from an empty list.
    #[must_use]
    pub fn stage(mut self, stage: StageDefinition) -> Self {
        self.stages.get_or_insert_with(Vec::new).push(stage);
        self
    }

    /// Sets the context policy.
    #[must_use]
    pub fn context_policy(mut self, policy: ContextPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage list is empty or contains duplicate roles.
    pub fn build(self) -> Result<OutlinePipeline, PipelineValidationError> {
        let catalog = match self.stages {
            Some(stages) => StageCatalog::new(stages)?,
            None => StageCatalog::fantasy_outline(),
        };

        Ok(OutlinePipeline::new(
            catalog,
            self.generator,
            self.policy,
            self.event_sink,
        ))
    }
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("generator", &self.generator.name())
            .field("stages", &self.stages.as_ref().map(Vec::len))
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ScriptedGenerator;
    use crate::stages::FANTASY_STAGE_COUNT;

    fn generator() -> Arc<dyn TextGenerator> {
        Arc::new(ScriptedGenerator::echo())
    }

    #[test]
    fn test_default_build_uses_fantasy_catalog() {
        let pipeline = PipelineBuilder::new(generator()).build().unwrap();

        assert_eq!(pipeline.stage_count(), FANTASY_STAGE_COUNT);
        assert_eq!(pipeline.context_policy(), ContextPolicy::FullTranscript);
    }

    #[test]
    fn test_stage_appends_in_order() {
        let pipeline = PipelineBuilder::new(generator())
            .stage(StageDefinition::new("first"))
            .stage(StageDefinition::new("second"))
            .context_policy(ContextPolicy::LastOutput)
            .build()
            .unwrap();

        assert_eq!(pipeline.catalog().roles(), vec!["first", "second"]);
        assert_eq!(pipeline.context_policy(), ContextPolicy::LastOutput);
    }

    #[test]
    fn test_empty_stage_list_rejected() {
        let err = PipelineBuilder::new(generator())
            .stages(Vec::new())
            .build()
            .unwrap_err();

        assert_eq!(err.code(), Some("PIPELINE-EMPTY"));
    }

    #[test]
    fn test_duplicate_roles_rejected() {
        let result = PipelineBuilder::new(generator())
            .stage(StageDefinition::new("same"))
            .stage(StageDefinition::new("same"))
            .build();

        assert!(result.is_err());
    }
}
