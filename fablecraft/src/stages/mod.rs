//! Stage definitions and the built-in fantasy outline catalog.
//!
//! Stages are plain immutable records: a role, a goal, a backstory, task
//! instructions and a description of the expected output. They carry no
//! behavior beyond rendering themselves into a prompt.

mod catalog;
mod definition;

pub use catalog::{fantasy_outline_stages, StageCatalog, FANTASY_STAGE_COUNT};
pub use definition::{StageDefinition, USER_IDEA_PLACEHOLDER};
