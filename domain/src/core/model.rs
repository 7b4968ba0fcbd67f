//! Model value object representing a generative model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generative models known to the comic pipeline (Value Object)
///
/// Text models answer the expert and script prompts with structured JSON;
/// image models return inline image parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Text models
    Gemini25Flash,
    Gemini25Pro,
    // Image models
    Gemini25FlashImagePreview,
    Gemini25FlashImage,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25FlashImagePreview => "gemini-2.5-flash-image-preview",
            Model::Gemini25FlashImage => "gemini-2.5-flash-image",
            Model::Custom(s) => s,
        }
    }

    /// Default model for the expert and script calls
    pub fn default_text() -> Model {
        Model::Gemini25Flash
    }

    /// Default model for panel illustrations
    pub fn default_image() -> Model {
        Model::Gemini25FlashImagePreview
    }

    /// Check if this is a known image-capable model
    pub fn is_image_model(&self) -> bool {
        matches!(
            self,
            Model::Gemini25FlashImagePreview | Model::Gemini25FlashImage
        )
    }
}

impl Default for Model {
    /// Returns the default text model
    fn default() -> Self {
        Model::default_text()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash-image-preview" => Model::Gemini25FlashImagePreview,
            "gemini-2.5-flash-image" => Model::Gemini25FlashImage,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}
