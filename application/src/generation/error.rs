//! Generation Client errors
//!
//! Each stage has one fixed, human-readable message that is shown to the
//! user verbatim. The underlying cause is kept for logs.

use crate::ports::generation_gateway::GatewayError;
use thiserror::Error;

/// Why a generation call failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("AI failed to generate comic panels.")]
    NoPanels,

    #[error("No image was generated by the model.")]
    NoImage,
}

/// Stage-specific failure of a Generation Client call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Could not identify a suitable expert for this topic.")]
    ExpertLookup(#[source] FailureCause),

    #[error("Failed to generate the comic's story. The model might be unable to process this request.")]
    ScriptGeneration(#[source] FailureCause),

    #[error("Failed to draw a comic panel.")]
    ImageGeneration(#[source] FailureCause),
}

impl GenerationError {
    pub fn cause(&self) -> &FailureCause {
        match self {
            GenerationError::ExpertLookup(c)
            | GenerationError::ScriptGeneration(c)
            | GenerationError::ImageGeneration(c) => c,
        }
    }

    /// Stage name used in logs
    pub fn stage(&self) -> &'static str {
        match self {
            GenerationError::ExpertLookup(_) => "identify_expert",
            GenerationError::ScriptGeneration(_) => "generate_script",
            GenerationError::ImageGeneration(_) => "generate_panel_image",
        }
    }
}
