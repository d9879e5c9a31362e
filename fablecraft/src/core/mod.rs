//! Core domain model types for fablecraft.
//!
//! This module contains the types every other module speaks in:
//! - Stage status enum
//! - Stage output record produced by each generation call

mod output;
mod status;

pub use output::StageOutput;
pub use status::StageStatus;
