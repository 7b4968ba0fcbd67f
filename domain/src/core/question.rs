//! Question value object

use serde::{Deserialize, Serialize};

/// A question the comic should answer (Value Object)
///
/// Only constructible from text that is non-empty after trimming.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = crate::DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s)
            .ok_or_else(|| crate::DomainError::InvalidQuestion("question is blank".to_string()))
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}
