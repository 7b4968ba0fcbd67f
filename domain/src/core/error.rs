//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Script contains no panels")]
    EmptyScript,

    #[error("Panel scene {scene} must be 1-based and unique")]
    InvalidScene { scene: u32 },

    #[error("Panel index {index} out of range (comic has {len} panels)")]
    PanelOutOfRange { index: usize, len: usize },

    #[error("Panel {scene} already has a different image")]
    ImageAlreadySet { scene: u32 },

    #[error("Invalid image data URI: {0}")]
    InvalidDataUri(String),
}
