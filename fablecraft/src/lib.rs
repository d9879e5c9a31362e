//! # Fablecraft
//!
//! Turns a one-line fantasy novel idea into a full outline by running seven
//! specialist stages in a fixed order against a text-generation service.
//!
//! Fablecraft provides:
//!
//! - **Stage catalog**: Ordered role definitions from idea extraction to continuity checking
//! - **Run context**: Every stage sees the outputs of the stages before it
//! - **Pluggable generators**: A Gemini client and a scripted generator for tests
//! - **Event-driven observability**: Stage events and tracing spans for each call
//! - **Rendering**: Markdown to styled HTML and the single-form outline page
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fablecraft::prelude::*;
//! use std::sync::Arc;
//!
//! let config = AppConfig::from_env()?;
//! let generator = Arc::new(GeminiGenerator::new(config.gemini_config()));
//!
//! let pipeline = OutlinePipeline::builder(generator)
//!     .context_policy(config.context_policy)
//!     .build()?;
//!
//! let result = pipeline.run("A girl finds a dragon egg").await?;
//! let html = format_output(&result.final_text);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod providers;
pub mod render;
pub mod stages;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::context::{ContextPolicy, RunContext, RunIdentity};
    pub use crate::core::{StageOutput, StageStatus};
    pub use crate::errors::{
        ConfigError, ContractErrorInfo, FablecraftError, PipelineValidationError, ProviderError,
    };
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::{
        generate_fantasy_outline, OutlinePipeline, PipelineBuilder, PipelineRunResult,
    };
    #[cfg(feature = "gemini")]
    pub use crate::providers::{GeminiConfig, GeminiGenerator};
    pub use crate::providers::{LlmResponse, ScriptedGenerator, TextGenerator};
    pub use crate::render::{format_output, load_background, render_page, stylesheet, Page};
    pub use crate::stages::{StageCatalog, StageDefinition};
}
