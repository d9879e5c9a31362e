//! The seven-stage fantasy outline catalog and the ordered stage collection.

use super::StageDefinition;
use crate::errors::{ContractErrorInfo, PipelineValidationError};
use std::collections::HashSet;

/// Number of stages in the built-in fantasy outline pipeline.
pub const FANTASY_STAGE_COUNT: usize = 7;

/// Returns the built-in stages, in execution order.
///
/// Extract idea → build world → build characters → build plot → break into
/// scenes → analyze theme → check consistency.
#[must_use]
pub fn fantasy_outline_stages() -> Vec<StageDefinition> {
    vec![
        StageDefinition::new("Idea Extractor")
            .with_goal(
                "Extract and refine a raw fantasy story idea into structured elements from {user_idea}.",
            )
            .with_backstory(
                "You are a creative consultant helping fantasy writers refine their initial story ideas. \
                 You specialize in identifying characters, setting, tone, conflict, and themes. \
                 You guide the entire outlining process by establishing a clear vision.",
            )
            .with_instructions(
                "1. Analyze the user's raw fantasy novel idea: {user_idea}.\n\
                 2. Identify the main characters, potential setting, central conflict, and themes.\n\
                 3. Clarify vague elements and structure the idea into a coherent story seed.\n\
                 4. Prepare the refined concept for use in worldbuilding and plotting.\n\
                 5. Generate 1000+ words with exhaustive commentary",
            )
            .with_expected_output(
                "A structured 1000+ word summary of the story idea including protagonist, world hints, tone, conflict, and themes.",
            ),
        StageDefinition::new("Worldbuilding Expert")
            .with_goal("Design an ULTRA-DETAILED fantasy world with comprehensive systems.")
            .with_backstory(
                "You are a seasoned worldbuilder who constructs vivid and believable fantasy realms. \
                 You define geography, cultures, magic systems, political structures, and mythologies \
                 that serve as the foundation for storytelling.",
            )
            .with_instructions(
                "1. Use the refined idea to design a vivid and immersive fantasy world.\n\
                 2. Define the geography, magic systems, political structures, and cultural norms.\n\
                 3. Include religion, history, economic systems, and mythologies where relevant.\n\
                 4. Ensure internal consistency and creative depth across the world design.\n\
                 5.Write at least 1000 words.",
            )
            .with_expected_output(
                "A detailed 2000+ word world document covering terrain, magic, politics, culture, and unique lore.",
            ),
        StageDefinition::new("Character Architect")
            .with_goal("Create detailed, multi-dimensional characters who drive the story forward.")
            .with_backstory(
                "You are a character development expert who crafts heroes, villains, and side characters. \
                 You define their backstories, motivations, arcs, relationships, and emotional journeys.",
            )
            .with_instructions(
                "1. Create detailed character profiles for at least one protagonist, one antagonist, and two key supporting characters.\n\
                 2. Define names, roles, traits, motivations, arcs, and relationships.\n\
                 3. Ensure each character supports the core theme and plot direction.\n\
                 4. Highlight how their evolution affects the story.\n\
                 5. Write at least 800+ words.",
            )
            .with_expected_output(
                "Four or more character bios totaling 800+ words with backstory, arc, and inter-character dynamics.",
            ),
        StageDefinition::new("Plot Structure Strategist")
            .with_goal("Generate a structured fantasy plot using traditional narrative frameworks.")
            .with_backstory(
                "You are a master storyteller who weaves plots using the Hero’s Journey, Three Act Structure, and other frameworks. \
                 You ensure that the plot flows logically and engages readers from start to finish.",
            )
            .with_instructions(
                "1. Develop a plot outline using the Hero’s Journey or Three-Act Structure.\n\
                 2. Include exposition, inciting incident, rising action, climax, and resolution.\n\
                 3. Integrate major turning points, conflicts, and internal dilemmas.\n\
                 4. Align plot beats with character and theme development.\n\
                 5. Write at least 800 words.",
            )
            .with_expected_output(
                "A structured plot outline with 800+ words covering 8–12 major beats linked to characters and world.",
            ),
        StageDefinition::new("Scene Breakdown Specialist")
            .with_goal("Translate the structured plot into detailed scene-by-scene or chapter-wise outlines.")
            .with_backstory(
                "You specialize in breaking stories into vivid scenes. \
                 You provide clear settings, goals, conflicts, and turning points for each scene \
                 to help the writer visualize and write the novel more easily.",
            )
            .with_instructions(
                "1. Break the structured plot into a detailed scene-by-scene or chapter-wise outline.\n\
                 2. For each scene, define the setting, involved characters, scene goal, and conflict.\n\
                 3. Include pacing considerations and emotional flow.\n\
                 4. Ensure each scene advances the plot and develops theme or character.\n\
                 5. Write at least 1000+ words.",
            )
            .with_expected_output(
                "A comprehensive 1000+ word scene-by-scene breakdown to guide novel structure.",
            ),
        StageDefinition::new("Theme & Tone Advisor")
            .with_goal(
                "Ensure thematic consistency and emotional depth across the outline align with {user_idea}.",
            )
            .with_backstory(
                "You are a literary expert who analyzes and suggests core themes, tones, and motifs. \
                 You help the story feel emotionally resonant and stylistically consistent throughout.",
            )
            .with_instructions(
                "1. Analyze the story concept and outline to extract central themes and motifs.\n\
                 2. Identify emotional tone (e.g., epic, tragic, whimsical) and stylistic cues.\n\
                 3. Suggest recurring symbols or metaphors that unify the narrative.\n\
                 4. Ensure tonal consistency from beginning to end.\n\
                 5. Write at least 400+ words.",
            )
            .with_expected_output(
                "A 400+ word theme and tone guideline covering core message, style, and motifs.",
            ),
        StageDefinition::new("Continuity & Logic Checker")
            .with_goal("Identify logical gaps, plot holes, and inconsistencies in the full outline.")
            .with_backstory(
                "You are an editorial specialist who reviews the full outline for quality control. \
                 You ensure that the plot, characters, and world are coherent and nothing is left underdeveloped.",
            )
            .with_instructions(
                "1. Review the complete outline for logic gaps, inconsistencies, or contradictions.\n\
                 2. Identify undeveloped or repetitive sections.\n\
                 3. Ensure character motivations, world rules, and plot developments align.\n\
                 4. Suggest direct edits or improvements for cohesion.\n\
                 5. Write at least 2000+ words.",
            )
            .with_expected_output(
                "A 2000+ word edited and annotated version of the full outline with feedback and fixes.",
            ),
    ]
}

/// An ordered, validated list of stages.
///
/// Iteration order is insertion order; nothing ever reorders the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCatalog {
    stages: Vec<StageDefinition>,
}

impl StageCatalog {
    /// Creates a catalog from stages in execution order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or two stages share a role.
    pub fn new(stages: Vec<StageDefinition>) -> Result<Self, PipelineValidationError> {
        if stages.is_empty() {
            return Err(PipelineValidationError::new("Pipeline has no stages").with_error_info(
                ContractErrorInfo::new("PIPELINE-EMPTY", "Cannot build an empty pipeline")
                    .with_fix_hint("Add at least one stage to the pipeline before building."),
            ));
        }

        let mut seen = HashSet::new();
        for stage in &stages {
            if !seen.insert(stage.role.as_str()) {
                return Err(PipelineValidationError::new(format!(
                    "Duplicate stage role '{}'",
                    stage.role
                ))
                .with_stages(vec![stage.role.clone()])
                .with_error_info(
                    ContractErrorInfo::new(
                        "PIPELINE-DUPLICATE-ROLE",
                        format!("Role '{}' appears more than once", stage.role),
                    )
                    .with_fix_hint("Give every stage a distinct role name."),
                ));
            }
        }

        Ok(Self { stages })
    }

    /// Returns the built-in fantasy outline catalog.
    #[must_use]
    pub fn fantasy_outline() -> Self {
        Self {
            stages: fantasy_outline_stages(),
        }
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; an empty catalog cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Iterates the stages in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, StageDefinition> {
        self.stages.iter()
    }

    /// Returns the stage at a one-based position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StageDefinition> {
        index.checked_sub(1).and_then(|i| self.stages.get(i))
    }

    /// Returns role names in execution order.
    #[must_use]
    pub fn roles(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.role.as_str()).collect()
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::fantasy_outline()
    }
}

impl<'a> IntoIterator for &'a StageCatalog {
    type Item = &'a StageDefinition;
    type IntoIter = std::slice::Iter<'a, StageDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
