//! Generation parameters - which models to call and how hard to fan out.
//!
//! [`GenerationParams`] is fixed for the lifetime of a session; every
//! submission uses the same models and audience level.

use comic_domain::{AudienceLevel, Model};
use serde::{Deserialize, Serialize};

/// Model selection and illustration fan-out control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Model for the expert and script calls.
    pub text_model: Model,
    /// Model for panel illustrations.
    pub image_model: Model,
    /// Tone target applied to every prompt.
    pub audience: AudienceLevel,
    /// Upper bound on image calls in flight. `None` fires every panel at once.
    pub max_concurrent_images: Option<usize>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            text_model: Model::default_text(),
            image_model: Model::default_image(),
            audience: AudienceLevel::default(),
            max_concurrent_images: None,
        }
    }
}

impl GenerationParams {
    // ==================== Builder Methods ====================

    pub fn with_text_model(mut self, model: Model) -> Self {
        self.text_model = model;
        self
    }

    pub fn with_image_model(mut self, model: Model) -> Self {
        self.image_model = model;
        self
    }

    pub fn with_audience(mut self, audience: AudienceLevel) -> Self {
        self.audience = audience;
        self
    }

    /// A limit of 0 is treated as "no limit".
    pub fn with_max_concurrent_images(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_images = limit.filter(|n| *n > 0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.text_model, Model::Gemini25Flash);
        assert_eq!(params.image_model, Model::Gemini25FlashImagePreview);
        assert_eq!(params.audience, AudienceLevel::default());
        assert_eq!(params.max_concurrent_images, None);
    }

    #[test]
    fn test_zero_limit_means_unbounded() {
        let params = GenerationParams::default().with_max_concurrent_images(Some(0));
        assert_eq!(params.max_concurrent_images, None);

        let params = GenerationParams::default().with_max_concurrent_images(Some(2));
        assert_eq!(params.max_concurrent_images, Some(2));
    }
}
