//! Router, shared state and request handlers.

use axum::{
    extract::{DefaultBodyLimit, Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use fablecraft::config::AppConfig;
use fablecraft::errors::FablecraftError;
use fablecraft::pipeline::OutlinePipeline;
use fablecraft::providers::{GeminiGenerator, TextGenerator};
use fablecraft::render::{format_output, load_background, render_page, stylesheet, Page};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Immutable state shared by every request.
#[derive(Debug)]
pub struct AppState {
    pipeline: OutlinePipeline,
    stylesheet: String,
}

type SharedState = Arc<AppState>;

impl AppState {
    /// Creates state from a ready pipeline and stylesheet.
    pub fn new(pipeline: OutlinePipeline, stylesheet: String) -> Self {
        Self {
            pipeline,
            stylesheet,
        }
    }

    /// Wires the Gemini generator, the pipeline and the page stylesheet.
    ///
    /// A missing API key is only logged; each run then fails at stage 1.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        if !config.has_api_key() {
            warn!("No API key set (api_key or GEMINI_API_KEY); outline requests will fail");
        }
        let generator: Arc<dyn TextGenerator> =
            Arc::new(GeminiGenerator::new(config.gemini_config()));
        Self::with_generator(config, generator)
    }

    /// Same as [`AppState::from_config`] with a caller-supplied generator.
    pub fn with_generator(
        config: &AppConfig,
        generator: Arc<dyn TextGenerator>,
    ) -> anyhow::Result<Self> {
        let pipeline = OutlinePipeline::builder(generator)
            .context_policy(config.context_policy)
            .build()?;
        let encoded = load_background(&config.background_image);

        info!(
            stages = pipeline.stage_count(),
            policy = %pipeline.context_policy(),
            background = !encoded.is_empty(),
            "Application state ready"
        );
        Ok(Self::new(pipeline, stylesheet(&encoded)))
    }
}

/// Form body posted by the page.
#[derive(Debug, Deserialize)]
pub struct IdeaForm {
    /// The user's story idea.
    #[serde(default)]
    pub idea: String,
}

/// Builds the application router.
///
/// Request bodies are not size-limited: an idea may be arbitrarily long.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index).post(craft))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(render_page(&Page::new(&state.stylesheet)))
}

#[instrument(skip_all, fields(idea_chars = form.idea.chars().count()))]
async fn craft(State(state): State<SharedState>, Form(form): Form<IdeaForm>) -> Response {
    match state.pipeline.run(&form.idea).await {
        Ok(result) => {
            info!(
                run_id = %result.run_id,
                duration_ms = result.duration_ms,
                "Outline generated"
            );
            let output = format_output(&result.final_text);
            let page = Page::new(&state.stylesheet)
                .with_idea(&form.idea)
                .with_output(&output);
            Html(render_page(&page)).into_response()
        }
        Err(err) => {
            error!(error = %err, stage = ?err.stage_index(), "Outline generation failed");
            let message = error_line(&err);
            let page = Page::new(&state.stylesheet)
                .with_idea(&form.idea)
                .with_error(&message);
            (StatusCode::BAD_GATEWAY, Html(render_page(&page))).into_response()
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

/// First line of the error, suitable for display.
fn error_line(err: &FablecraftError) -> String {
    err.to_string().lines().next().unwrap_or_default().to_string()
}
