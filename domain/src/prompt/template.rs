//! Prompt templates for the comic pipeline

use crate::core::audience::AudienceLevel;

/// Templates for the three generation calls
pub struct ComicPromptTemplate;

impl ComicPromptTemplate {
    /// Prompt asking for the expert best suited to guide the comic
    pub fn identify_expert(question: &str) -> String {
        format!(
            r#"For the question: "{}", identify the single most famous and visually recognizable historical expert or scientist related to this topic. Provide their name and a brief, one-sentence visual description for an illustrator."#,
            question
        )
    }

    /// Prompt asking for the four-scene script
    pub fn story_script(question: &str, level: &AudienceLevel, expert_name: &str) -> String {
        format!(
            r#"Create a comic book script that answers the question: "{}". The story should be narrated and guided by the famous expert, {}. The explanation should be tailored {}. The comic should have a clear beginning, middle, and end, breaking down the concept into exactly 4 simple, visual scenes. Provide a title, a summary, and details for each panel."#,
            question, expert_name, level
        )
    }

    /// Prompt for a single panel illustration
    pub fn panel_image(
        panel_description: &str,
        level: &AudienceLevel,
        expert_description: &str,
    ) -> String {
        format!(
            r#"Create a vibrant, simple, and clear comic book panel illustration. The style should be friendly and educational, suitable {}. Do not include any text, speech bubbles, or panel borders. The scene is: "{}". The scene features {} explaining the concept. Maintain the comic style consistently."#,
            level, panel_description, expert_description
        )
    }
}
