//! Event sink system for run progress.
//!
//! The pipeline emits one event when each stage starts, one when it
//! completes or fails, and one when the run finishes. Sinks are passed to the
//! pipeline explicitly; there is no process-wide sink.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// Event type emitted before a stage calls the generator.
pub const STAGE_STARTED: &str = "stage.started";
/// Event type emitted after a stage produced text.
pub const STAGE_COMPLETED: &str = "stage.completed";
/// Event type emitted when a stage's generator call failed.
pub const STAGE_FAILED: &str = "stage.failed";
/// Event type emitted after the final stage completed.
pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
