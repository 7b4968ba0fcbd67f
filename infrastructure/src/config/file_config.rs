//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use comic_application::GenerationParams;
use comic_domain::{AudienceLevel, Model, OutputFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// Re-export OutputFormat from domain for convenience
pub use comic_domain::OutputFormat as FileOutputFormat;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("max_concurrent_images cannot be 0")]
    InvalidConcurrency,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("api_key_env cannot be empty")]
    EmptyApiKeyEnv,
}

/// Raw model selection from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for expert lookup and story scripts
    pub text: Model,
    /// Model for panel illustrations
    pub image: Model,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            text: Model::default_text(),
            image: Model::default_image(),
        }
    }
}

/// Raw generation behavior from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Audience phrase spliced into every prompt
    pub audience: AudienceLevel,
    /// Cap on simultaneous image requests (unset = all panels at once)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_images: Option<usize>,
}

/// Raw API connection settings from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
            api_key_env: "API_KEY".to_string(),
        }
    }
}

impl FileApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the spinner while a comic is being made
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            show_progress: true,
        }
    }
}

/// Complete file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub models: FileModelsConfig,
    pub generation: FileGenerationConfig,
    pub api: FileApiConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if let Some(0) = self.generation.max_concurrent_images {
            return Err(ConfigValidationError::InvalidConcurrency);
        }

        for model in [&self.models.text, &self.models.image] {
            if model.as_str().trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName);
            }
        }

        if self.api.api_key_env.trim().is_empty() {
            return Err(ConfigValidationError::EmptyApiKeyEnv);
        }

        Ok(())
    }

    /// Render the effective configuration as TOML (for --show-config)
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Session-wide generation parameters
    pub fn to_generation_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_text_model(self.models.text.clone())
            .with_image_model(self.models.image.clone())
            .with_audience(self.generation.audience.clone())
            .with_max_concurrent_images(self.generation.max_concurrent_images)
    }
}
