//! A single stage record and its prompt rendering.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the user's idea in goals and instructions.
pub const USER_IDEA_PLACEHOLDER: &str = "{user_idea}";

/// An immutable stage record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Role name, unique within a pipeline.
    pub role: String,
    /// What the stage is trying to achieve. May contain `{user_idea}`.
    pub goal: String,
    /// Persona text given to the model.
    pub backstory: String,
    /// Numbered task instructions. May contain `{user_idea}`.
    pub instructions: String,
    /// Description of the output the stage should produce.
    pub expected_output: String,
}

impl StageDefinition {
    /// Creates a stage with the given role and empty texts.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: String::new(),
            backstory: String::new(),
            instructions: String::new(),
            expected_output: String::new(),
        }
    }

    /// Sets the goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Sets the backstory.
    #[must_use]
    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }

    /// Sets the task instructions.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Sets the expected output description.
    #[must_use]
    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = expected_output.into();
        self
    }

    /// Returns the goal with the idea substituted in.
    #[must_use]
    pub fn render_goal(&self, idea: &str) -> String {
        self.goal.replace(USER_IDEA_PLACEHOLDER, idea)
    }

    /// Returns the instructions with the idea substituted in.
    #[must_use]
    pub fn render_instructions(&self, idea: &str) -> String {
        self.instructions.replace(USER_IDEA_PLACEHOLDER, idea)
    }

    /// Renders the full prompt sent to the generator for this stage.
    ///
    /// The idea is inserted verbatim; it is neither trimmed nor escaped.
    #[must_use]
    pub fn compose_prompt(&self, idea: &str) -> String {
        format!(
            "You are the {role}. {backstory}\n\n\
             Your goal: {goal}\n\n\
             Task:\n{instructions}\n\n\
             Expected output: {expected}",
            role = self.role,
            backstory = self.backstory,
            goal = self.render_goal(idea),
            instructions = self.render_instructions(idea),
            expected = self.expected_output,
        )
    }
}
