//! Gemini generation gateway over the public REST API

use super::error::{GeminiError, Result};
use super::protocol::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use comic_application::{GatewayError, GenerationGateway, ResponsePart};
use comic_domain::Model;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// API key read from the environment. Never printed.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Read the key from the environment variable `var`
    pub fn from_env(var: &str) -> Result<Self> {
        Self::resolve(var, |name| std::env::var(name).ok())
    }

    /// Resolve the key through an arbitrary lookup; blank values count as missing.
    pub fn resolve(var: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(var) {
            Some(value) if !value.trim().is_empty() => Ok(Self(value.trim().to_string())),
            _ => Err(GeminiError::MissingApiKey(var.to_string())),
        }
    }

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Connection settings for [`GeminiGateway`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Generation gateway implementation for Google Gemini
pub struct GeminiGateway {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        info!(
            "GeminiGateway initialized (base_url: {}, timeout: {:?})",
            config.base_url, config.timeout
        );

        Ok(Self { client, config })
    }

    fn endpoint(&self, model: &Model) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        debug!("Gemini request: POST {} (key: ***)", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| raw.chars().take(200).collect());
            warn!("Gemini returned HTTP {}: {}", status.as_u16(), message);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&raw).map_err(|e| GeminiError::ParseError {
            error: e.to_string(),
            raw: raw.chars().take(500).collect(),
        })
    }
}

#[async_trait]
impl GenerationGateway for GeminiGateway {
    async fn generate_structured(
        &self,
        model: &Model,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> std::result::Result<String, GatewayError> {
        let request = GenerateContentRequest::structured(prompt, schema);
        let response = self.generate_content(model, &request).await?;

        if response.first_candidate_parts().is_none() {
            return Err(GeminiError::NoCandidates {
                reason: response.block_reason(),
            }
            .into());
        }
        Ok(response.text().ok_or(GeminiError::NoText)?)
    }

    async fn generate_image(
        &self,
        model: &Model,
        prompt: &str,
    ) -> std::result::Result<Vec<ResponsePart>, GatewayError> {
        let request = GenerateContentRequest::image(prompt);
        let response = self.generate_content(model, &request).await?;

        let reason = response.block_reason();
        let parts = response
            .into_parts()
            .ok_or(GeminiError::NoCandidates { reason })?;
        debug!("Gemini image response with {} part(s)", parts.len());
        Ok(parts)
    }
}
