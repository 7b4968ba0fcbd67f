//! Self-contained image data URI

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// An image encoded as `data:<mime>;base64,<payload>` (Value Object)
///
/// The payload is kept exactly as the model returned it; it is never decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageDataUri {
    mime_type: String,
    payload: String,
}

impl ImageDataUri {
    pub fn new(mime_type: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: payload.into(),
        }
    }

    /// Parse the `data:<mime>;base64,<payload>` form.
    pub fn parse(uri: &str) -> Result<Self, DomainError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| DomainError::InvalidDataUri("missing data: prefix".to_string()))?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| DomainError::InvalidDataUri("missing ;base64, marker".to_string()))?;
        if mime_type.is_empty() || payload.is_empty() {
            return Err(DomainError::InvalidDataUri(
                "empty mime type or payload".to_string(),
            ));
        }
        Ok(Self::new(mime_type, payload))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Approximate size of the decoded image in bytes
    pub fn decoded_len(&self) -> usize {
        let padding = self.payload.bytes().rev().take_while(|b| *b == b'=').count();
        (self.payload.len() * 3 / 4).saturating_sub(padding)
    }
}

impl std::fmt::Display for ImageDataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}

impl TryFrom<String> for ImageDataUri {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ImageDataUri> for String {
    fn from(uri: ImageDataUri) -> Self {
        uri.to_string()
    }
}
