//! End-to-end runs of the outline pipeline against scripted generators.

use super::{generate_fantasy_outline, OutlinePipeline};
use crate::context::ContextPolicy;
use crate::errors::{FablecraftError, ProviderError};
use crate::events::{
    CollectingEventSink, PIPELINE_COMPLETED, STAGE_COMPLETED, STAGE_FAILED, STAGE_STARTED,
};
use crate::providers::ScriptedGenerator;
use crate::stages::{StageCatalog, StageDefinition, FANTASY_STAGE_COUNT};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const IDEA: &str = "A girl finds a dragon egg";

fn markers() -> Vec<String> {
    (1..=FANTASY_STAGE_COUNT).map(|i| format!("OUT{i}")).collect()
}

fn pipeline_with(
    generator: &Arc<ScriptedGenerator>,
    policy: ContextPolicy,
) -> (OutlinePipeline, Arc<CollectingEventSink>) {
    let sink = Arc::new(CollectingEventSink::new());
    let pipeline = OutlinePipeline::builder(generator.clone())
        .context_policy(policy)
        .event_sink(sink.clone())
        .build()
        .unwrap();
    (pipeline, sink)
}

#[tokio::test]
async fn test_final_text_is_last_stage_output() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    let result = pipeline.run(IDEA).await.unwrap();

    assert_eq!(result.final_text, "OUT7");
    assert_eq!(result.idea, IDEA);
    assert_eq!(result.stage_count(), FANTASY_STAGE_COUNT);
    assert_eq!(generator.call_count(), FANTASY_STAGE_COUNT);
    assert!(result.stages.iter().all(|s| s.is_success()));
}

#[tokio::test]
async fn test_stages_run_in_catalog_order() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    let result = pipeline.run(IDEA).await.unwrap();

    let catalog = StageCatalog::fantasy_outline();
    let calls = generator.calls();
    for (position, (role, (prompt, _))) in catalog.roles().iter().zip(&calls).enumerate() {
        assert!(
            prompt.starts_with(&format!("You are the {role}.")),
            "call {} went to the wrong stage: {prompt}",
            position + 1
        );
    }

    let indexes: Vec<_> = result.stages.iter().map(|s| s.index).collect();
    assert_eq!(indexes, (1..=FANTASY_STAGE_COUNT).collect::<Vec<_>>());
    assert_eq!(result.stage("Idea Extractor").map(|s| s.text.as_str()), Some("OUT1"));
}

#[tokio::test]
async fn test_idea_reaches_templated_stages() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    pipeline.run(IDEA).await.unwrap();

    let calls = generator.calls();
    assert!(calls[0].0.contains(IDEA));
    assert!(calls[5].0.contains(IDEA));
    assert!(calls.iter().all(|(prompt, _)| !prompt.contains("{user_idea}")));
}

#[tokio::test]
async fn test_first_stage_sees_no_context() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    pipeline.run(IDEA).await.unwrap();

    assert_eq!(generator.calls()[0].1, "");
}

#[tokio::test]
async fn test_full_transcript_threads_every_prior_output() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    pipeline.run(IDEA).await.unwrap();

    let calls = generator.calls();
    for (position, (_, context)) in calls.iter().enumerate() {
        for earlier in 1..=position {
            assert!(
                context.contains(&format!("OUT{earlier}")),
                "stage {} is missing output {earlier}",
                position + 1
            );
        }
        assert!(!context.contains(&format!("OUT{}", position + 1)));
    }
}

#[tokio::test]
async fn test_last_output_threads_only_previous_stage() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::LastOutput);

    pipeline.run(IDEA).await.unwrap();

    let calls = generator.calls();
    assert_eq!(calls[3].1, "## Character Architect (stage 3)\n\nOUT3");
    assert!(!calls[3].1.contains("OUT2"));
    assert_eq!(calls[6].1, "## Theme & Tone Advisor (stage 6)\n\nOUT6");
}

#[tokio::test]
async fn test_failure_aborts_remaining_stages() {
    let generator = Arc::new(
        ScriptedGenerator::new(markers()).failing_on(
            3,
            ProviderError::Api {
                status: 503,
                message: "overloaded".to_string(),
            },
        ),
    );
    let (pipeline, sink) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    let err = pipeline.run(IDEA).await.unwrap_err();

    assert_eq!(err.stage_index(), Some(3));
    assert_eq!(generator.call_count(), 3);
    match err {
        FablecraftError::Stage { role, source, .. } => {
            assert_eq!(role, "Character Architect");
            assert_eq!(
                source,
                ProviderError::Api {
                    status: 503,
                    message: "overloaded".to_string()
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    let failed = sink.events_of_type(STAGE_FAILED);
    assert_eq!(failed.len(), 1);
    let data = failed[0].1.as_ref().unwrap();
    assert_eq!(data["index"], 3);
    assert_eq!(data["status"], "fail");
    assert_eq!(data["provider_error"]["type"], "Api");
    assert_eq!(data["provider_error"]["status"], 503);
    assert!(sink.events_of_type(PIPELINE_COMPLETED).is_empty());
}

#[tokio::test]
async fn test_missing_api_key_fails_first_stage() {
    let generator =
        Arc::new(ScriptedGenerator::echo().failing_on(1, ProviderError::MissingApiKey));
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    let err = pipeline.run(IDEA).await.unwrap_err();

    assert_eq!(err.stage_index(), Some(1));
    assert_eq!(generator.call_count(), 1);
    assert!(err.to_string().contains("API key"));
}

#[tokio::test]
async fn test_events_bracket_each_stage() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));
    let (pipeline, sink) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    let result = pipeline.run(IDEA).await.unwrap();

    let mut expected = Vec::new();
    for _ in 0..FANTASY_STAGE_COUNT {
        expected.push(STAGE_STARTED.to_string());
        expected.push(STAGE_COMPLETED.to_string());
    }
    expected.push(PIPELINE_COMPLETED.to_string());
    assert_eq!(sink.event_types(), expected);

    let (_, data) = &sink.events_of_type(STAGE_COMPLETED)[0];
    let data = data.as_ref().unwrap();
    assert_eq!(data["run_id"], result.run_id.to_string());
    assert_eq!(data["role"], "Idea Extractor");
    assert_eq!(data["index"], 1);

    let (_, started) = &sink.events_of_type(STAGE_STARTED)[0];
    assert_eq!(started.as_ref().unwrap()["status"], "running");

    let (_, completed) = &sink.events_of_type(PIPELINE_COMPLETED)[0];
    let completed = completed.as_ref().unwrap();
    assert_eq!(completed["run_id"], result.run_id.to_string());
    assert_eq!(completed["stages"], FANTASY_STAGE_COUNT);
    assert!(completed["started_at"].is_string());
}

#[tokio::test]
async fn test_empty_idea_is_forwarded() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    let result = pipeline.run("").await.unwrap();

    assert_eq!(result.idea, "");
    assert_eq!(result.final_text, "OUT7");
    assert_eq!(generator.call_count(), FANTASY_STAGE_COUNT);
}

#[tokio::test]
async fn test_custom_stage_list() {
    let generator = Arc::new(ScriptedGenerator::echo());
    let pipeline = OutlinePipeline::builder(generator.clone())
        .stage(StageDefinition::new("Namer").with_instructions("Name {user_idea}"))
        .build()
        .unwrap();

    let result = pipeline.run("the dragon").await.unwrap();

    assert_eq!(result.stage_count(), 1);
    assert!(result.final_text.contains("Name the dragon"));
}

#[tokio::test]
async fn test_generate_fantasy_outline() {
    let generator = Arc::new(ScriptedGenerator::new(markers()));

    let text = generate_fantasy_outline(generator.clone(), IDEA).await.unwrap();

    assert_eq!(text, "OUT7");
    assert_eq!(generator.call_count(), FANTASY_STAGE_COUNT);
}

#[tokio::test]
async fn test_reruns_are_independent() {
    let generator = Arc::new(ScriptedGenerator::echo());
    let (pipeline, _) = pipeline_with(&generator, ContextPolicy::FullTranscript);

    let first = pipeline.run("first idea").await.unwrap();
    generator.reset();
    let second = pipeline.run("second idea").await.unwrap();

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(generator.calls()[0].1, "");
    assert!(!second.final_text.contains("first idea"));
}
