//! Strictly sequential outline pipeline.

use super::{PipelineBuilder, PipelineRunResult};
use crate::context::{ContextPolicy, RunContext};
use crate::core::{StageOutput, StageStatus};
use crate::errors::FablecraftError;
use crate::events::{EventSink, PIPELINE_COMPLETED, STAGE_COMPLETED, STAGE_FAILED, STAGE_STARTED};
use crate::observability::SpanTimer;
use crate::providers::TextGenerator;
use crate::stages::{StageCatalog, StageDefinition};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};

/// Runs the stage catalog one stage at a time against a generator.
///
/// Each stage is called exactly once. Stage `n` sees the outputs of stages
/// `1..n` through the run context, filtered by the context policy. The first
/// generator error ends the run; nothing is retried.
pub struct OutlinePipeline {
    catalog: StageCatalog,
    generator: Arc<dyn TextGenerator>,
    policy: ContextPolicy,
    event_sink: Arc<dyn EventSink>,
}

impl OutlinePipeline {
    pub(super) fn new(
        catalog: StageCatalog,
        generator: Arc<dyn TextGenerator>,
        policy: ContextPolicy,
        event_sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            catalog,
            generator,
            policy,
            event_sink,
        }
    }

    /// Starts building a pipeline around a generator.
    #[must_use]
    pub fn builder(generator: Arc<dyn TextGenerator>) -> PipelineBuilder {
        PipelineBuilder::new(generator)
    }

    /// Returns the stage catalog.
    #[must_use]
    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.catalog.len()
    }

    /// Returns the context policy.
    #[must_use]
    pub fn context_policy(&self) -> ContextPolicy {
        self.policy
    }

    /// Runs every stage for an idea and returns the final stage's text.
    ///
    /// The idea is forwarded as given: empty or malformed input is not
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`FablecraftError::Stage`] for the first stage whose generator
    /// call fails. Later stages are not executed.
    pub async fn run(&self, idea: &str) -> Result<PipelineRunResult, FablecraftError> {
        let ctx = RunContext::new(idea);
        let span = info_span!("pipeline", run_id = %ctx.identity().run_id, stages = self.catalog.len());
        self.run_context(ctx).instrument(span).await
    }

    async fn run_context(&self, mut ctx: RunContext) -> Result<PipelineRunResult, FablecraftError> {
        let run_id = ctx.identity().run_id;
        let timer = SpanTimer::start();
        info!(
            generator = self.generator.name(),
            policy = %self.policy,
            idea_chars = ctx.idea().chars().count(),
            "Pipeline run started"
        );

        for (position, stage) in self.catalog.iter().enumerate() {
            let output = self.run_stage(position + 1, stage, &ctx).await?;
            ctx.record(output);
        }

        let duration_ms = timer.finish();
        info!(duration_ms, "Pipeline run completed");
        let mut payload = ctx.identity().to_dict();
        payload.insert("stages".to_string(), serde_json::json!(ctx.outputs().len()));
        payload.insert("duration_ms".to_string(), serde_json::json!(duration_ms));
        self.event_sink
            .emit(PIPELINE_COMPLETED, serde_json::to_value(payload).ok())
            .await;

        Ok(PipelineRunResult {
            run_id,
            idea: ctx.idea().to_string(),
            final_text: ctx.final_text().to_string(),
            stages: ctx.into_outputs(),
            duration_ms,
        })
    }

    async fn run_stage(
        &self,
        index: usize,
        stage: &StageDefinition,
        ctx: &RunContext,
    ) -> Result<StageOutput, FablecraftError> {
        let run_id = ctx.identity().run_id.to_string();
        let prompt = stage.compose_prompt(ctx.idea());
        let context = ctx.render_for(self.policy);

        self.event_sink
            .emit(
                STAGE_STARTED,
                Some(serde_json::json!({
                    "run_id": run_id,
                    "index": index,
                    "role": stage.role,
                    "status": StageStatus::Running.to_string(),
                })),
            )
            .await;

        let span = info_span!("stage", index, role = %stage.role);
        let timer = SpanTimer::start();
        let result = self
            .generator
            .generate(&prompt, &context)
            .instrument(span)
            .await;
        let latency_ms = timer.finish();

        match result {
            Ok(response) => {
                debug!(attributes = ?response.to_otel_attributes(), "Generator response");
                info!(
                    index,
                    role = %stage.role,
                    latency_ms,
                    output_chars = response.content.chars().count(),
                    "Stage completed"
                );
                let output = StageOutput::ok(index, &stage.role, response.content)
                    .with_prompt(prompt)
                    .with_model(response.model)
                    .with_latency_ms(latency_ms)
                    .with_tokens(response.input_tokens, response.output_tokens);

                let mut payload = output.to_dict();
                payload.insert("run_id".to_string(), serde_json::json!(run_id));
                self.event_sink
                    .emit(STAGE_COMPLETED, serde_json::to_value(payload).ok())
                    .await;

                Ok(output)
            }
            Err(source) => {
                error!(index, role = %stage.role, error = %source, "Stage failed");
                let failed = StageOutput::fail(index, &stage.role, source.to_string())
                    .with_latency_ms(latency_ms);
                let mut payload = failed.to_dict();
                payload.insert("provider_error".to_string(), serde_json::json!(source.to_dict()));
                payload.insert("run_id".to_string(), serde_json::json!(run_id));
                self.event_sink
                    .emit(STAGE_FAILED, serde_json::to_value(payload).ok())
                    .await;

                Err(FablecraftError::stage(index, &stage.role, source))
            }
        }
    }
}

impl std::fmt::Debug for OutlinePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlinePipeline")
            .field("stages", &self.catalog.roles())
            .field("generator", &self.generator.name())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Runs the built-in seven-stage pipeline and returns the final text.
///
/// # Errors
///
/// Returns the first stage failure.
pub async fn generate_fantasy_outline(
    generator: Arc<dyn TextGenerator>,
    idea: &str,
) -> Result<String, FablecraftError> {
    let pipeline = OutlinePipeline::builder(generator).build()?;
    Ok(pipeline.run(idea).await?.final_text)
}
