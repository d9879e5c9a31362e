//! Run context threaded explicitly from stage to stage.
//!
//! This module provides:
//! - Run identity for correlating logs and events
//! - The accumulating run context holding the idea and prior stage outputs
//! - The policy deciding how much of that context each stage sees

mod identity;
mod policy;
mod run;

pub use identity::RunIdentity;
pub use policy::ContextPolicy;
pub use run::RunContext;
