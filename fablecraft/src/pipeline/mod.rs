//! Pipeline building and execution.
//!
//! This module provides:
//! - A builder validating the stage list and wiring the generator
//! - The strictly sequential outline pipeline
//! - The run result handed to the presentation layer

mod builder;
#[cfg(test)]
mod integration_tests;
mod result;
mod runner;

pub use builder::PipelineBuilder;
pub use result::PipelineRunResult;
pub use runner::{generate_fantasy_outline, OutlinePipeline};
