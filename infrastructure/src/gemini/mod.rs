//! Google Gemini adapter
//!
//! Implements [`GenerationGateway`](comic_application::GenerationGateway)
//! against the `generateContent` REST endpoint using `reqwest`.

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::GeminiError;
pub use gateway::{ApiKey, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, GeminiConfig, GeminiGateway};
