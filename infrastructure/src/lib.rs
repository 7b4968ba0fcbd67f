//! Infrastructure layer for comic-tutor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig, FileGenerationConfig,
    FileModelsConfig, FileOutputConfig, FileOutputFormat,
};
pub use gemini::{ApiKey, GeminiConfig, GeminiError, GeminiGateway};
