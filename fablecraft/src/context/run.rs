//! The accumulating per-run context.

use super::{ContextPolicy, RunIdentity};
use crate::core::StageOutput;

/// State of one pipeline run: the idea and every stage output so far.
///
/// A run context is created per submission, grows by one output per stage,
/// and is dropped once the final text has been rendered.
#[derive(Debug, Clone)]
pub struct RunContext {
    identity: RunIdentity,
    idea: String,
    outputs: Vec<StageOutput>,
}

impl RunContext {
    /// Creates an empty context for an idea.
    ///
    /// The idea is stored as given; empty strings are allowed.
    #[must_use]
    pub fn new(idea: impl Into<String>) -> Self {
        Self::with_identity(RunIdentity::new(), idea)
    }

    /// Creates an empty context with a specific identity.
    #[must_use]
    pub fn with_identity(identity: RunIdentity, idea: impl Into<String>) -> Self {
        Self {
            identity,
            idea: idea.into(),
            outputs: Vec::new(),
        }
    }

    /// Returns the run identity.
    #[must_use]
    pub fn identity(&self) -> &RunIdentity {
        &self.identity
    }

    /// Returns the user's idea.
    #[must_use]
    pub fn idea(&self) -> &str {
        &self.idea
    }

    /// Appends a stage output.
    pub fn record(&mut self, output: StageOutput) {
        self.outputs.push(output);
    }

    /// Returns all recorded outputs in stage order.
    #[must_use]
    pub fn outputs(&self) -> &[StageOutput] {
        &self.outputs
    }

    /// Returns the most recent output.
    #[must_use]
    pub fn last_output(&self) -> Option<&StageOutput> {
        self.outputs.last()
    }

    /// Returns the text of the most recent output, or an empty string.
    #[must_use]
    pub fn final_text(&self) -> &str {
        self.last_output().map_or("", |o| o.text.as_str())
    }

    /// Consumes the context, returning its outputs.
    #[must_use]
    pub fn into_outputs(self) -> Vec<StageOutput> {
        self.outputs
    }

    /// Renders the context block the next stage will see.
    ///
    /// Returns an empty string before the first stage has completed.
    #[must_use]
    pub fn render_for(&self, policy: ContextPolicy) -> String {
        let visible: &[StageOutput] = match policy {
            ContextPolicy::FullTranscript => &self.outputs,
            ContextPolicy::LastOutput => {
                let start = self.outputs.len().saturating_sub(1);
                &self.outputs[start..]
            }
        };

        visible
            .iter()
            .map(|o| format!("## {} (stage {})\n\n{}", o.role, o.index, o.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context_with(n: usize) -> RunContext {
        let mut ctx = RunContext::new("A girl finds a dragon egg");
        for i in 1..=n {
            ctx.record(StageOutput::ok(i, format!("role{i}"), format!("text{i}")));
        }
        ctx
    }

    #[test]
    fn test_new_context_is_empty() {
        let ctx = RunContext::new("");

        assert_eq!(ctx.idea(), "");
        assert!(ctx.outputs().is_empty());
        assert_eq!(ctx.final_text(), "");
        assert_eq!(ctx.render_for(ContextPolicy::FullTranscript), "");
        assert_eq!(ctx.render_for(ContextPolicy::LastOutput), "");
    }

    #[test]
    fn test_record_preserves_order() {
        let ctx = context_with(3);
        let indexes: Vec<_> = ctx.outputs().iter().map(|o| o.index).collect();

        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(ctx.final_text(), "text3");
    }

    #[test]
    fn test_full_transcript_includes_every_output() {
        let rendered = context_with(2).render_for(ContextPolicy::FullTranscript);

        assert_eq!(rendered, "## role1 (stage 1)\n\ntext1\n\n## role2 (stage 2)\n\ntext2");
    }

    #[test]
    fn test_last_output_only_includes_previous_stage() {
        let rendered = context_with(3).render_for(ContextPolicy::LastOutput);

        assert_eq!(rendered, "## role3 (stage 3)\n\ntext3");
    }
}
