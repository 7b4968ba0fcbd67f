//! Audience level value object

use serde::{Deserialize, Serialize};

const KIDS_LEARNING_LEVEL: &str = "for a curious 8-year-old kid";

/// Tone and complexity target applied to every prompt in a session.
///
/// Stored as the phrase spliced into prompts ("tailored for a curious
/// 8-year-old kid").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudienceLevel(String);

impl AudienceLevel {
    /// Build from a phrase; blank input falls back to the default level.
    pub fn new(phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        if phrase.trim().is_empty() {
            Self::default()
        } else {
            Self(phrase.trim().to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AudienceLevel {
    fn default() -> Self {
        Self(KIDS_LEARNING_LEVEL.to_string())
    }
}

impl std::fmt::Display for AudienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
