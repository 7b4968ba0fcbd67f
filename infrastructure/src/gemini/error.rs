//! Error types for the Gemini adapter

use comic_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when calling the Gemini REST API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Response contained no candidates{}", .reason.as_deref().map(|r| format!(" ({})", r)).unwrap_or_default())]
    NoCandidates { reason: Option<String> },

    #[error("Candidate contained no text")]
    NoText,
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey(var) => GatewayError::MissingCredential(var),
            GeminiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(e) => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Api { status, message } => GatewayError::HttpStatus { status, message },
            GeminiError::ParseError { error, .. } => GatewayError::InvalidResponse(error),
            GeminiError::NoCandidates { .. } => GatewayError::EmptyResponse,
            GeminiError::NoText => GatewayError::InvalidResponse("no text in candidate".to_string()),
        }
    }
}
