//! Generation gateway port
//!
//! Defines the interface for talking to the hosted generative model API.

use async_trait::async_trait;
use comic_domain::Model;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Response contained no candidates")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One part of a multi-part model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    Text(String),
    /// Base64 payload exactly as returned, plus its MIME type
    InlineData { mime_type: String, data: String },
}

/// Gateway to the generative model service
///
/// This port defines how the application layer reaches the hosted model.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Ask a text model for JSON conforming to `schema`; returns the raw JSON text.
    async fn generate_structured(
        &self,
        model: &Model,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, GatewayError>;

    /// Ask an image model for a response that may contain inline image data.
    async fn generate_image(
        &self,
        model: &Model,
        prompt: &str,
    ) -> Result<Vec<ResponsePart>, GatewayError>;
}
