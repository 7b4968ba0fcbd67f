//! Generation Client
//!
//! Wraps the three remote operations (identify expert, generate script,
//! generate panel image) behind typed contracts. Each call is a single
//! request/response: no caching, no retry.

use super::error::{FailureCause, GenerationError};
use crate::config::GenerationParams;
use crate::ports::generation_gateway::{GenerationGateway, ResponsePart};
use comic_domain::{
    AudienceLevel, ComicDocument, ComicPanel, ComicPromptTemplate, ComicSchemas, DomainError,
    Expert, ImageDataUri, Question,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Deserialize)]
struct ExpertPayload {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct ScriptPayload {
    title: Option<String>,
    #[serde(default)]
    panels: Vec<PanelPayload>,
    summary: Option<String>,
}

#[derive(Deserialize)]
struct PanelPayload {
    scene: u32,
    description: String,
    narration: String,
}

/// Typed client over a [`GenerationGateway`]
pub struct GenerationClient<G: GenerationGateway> {
    gateway: Arc<G>,
    params: GenerationParams,
}

impl<G: GenerationGateway> GenerationClient<G> {
    pub fn new(gateway: Arc<G>, params: GenerationParams) -> Self {
        Self { gateway, params }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Identify the expert who will guide the comic.
    pub async fn identify_expert(&self, question: &Question) -> Result<Expert, GenerationError> {
        let prompt = ComicPromptTemplate::identify_expert(question.content());
        debug!(model = %self.params.text_model, "Requesting expert");

        let result: Result<Expert, FailureCause> = async {
            let raw = self
                .gateway
                .generate_structured(&self.params.text_model, &prompt, &ComicSchemas::expert())
                .await?;
            parse_expert(&raw)
        }
        .await;

        result.map_err(|cause| {
            error!("Error identifying expert: {}", cause);
            GenerationError::ExpertLookup(cause)
        })
    }

    /// Generate the comic script; panels come back without images.
    pub async fn generate_script(
        &self,
        question: &Question,
        audience: &AudienceLevel,
        expert_name: &str,
    ) -> Result<ComicDocument, GenerationError> {
        let prompt = ComicPromptTemplate::story_script(question.content(), audience, expert_name);
        debug!(model = %self.params.text_model, "Requesting story script");

        let result: Result<ComicDocument, FailureCause> = async {
            let raw = self
                .gateway
                .generate_structured(&self.params.text_model, &prompt, &ComicSchemas::story())
                .await?;
            parse_script(&raw)
        }
        .await;

        result.map_err(|cause| {
            error!("Error generating story script: {}", cause);
            GenerationError::ScriptGeneration(cause)
        })
    }

    /// Draw one panel and return it as a data URI.
    pub async fn generate_panel_image(
        &self,
        panel_description: &str,
        audience: &AudienceLevel,
        expert_description: &str,
    ) -> Result<ImageDataUri, GenerationError> {
        let prompt =
            ComicPromptTemplate::panel_image(panel_description, audience, expert_description);
        debug!(model = %self.params.image_model, "Requesting panel image");

        let result: Result<ImageDataUri, FailureCause> = async {
            let parts = self
                .gateway
                .generate_image(&self.params.image_model, &prompt)
                .await?;
            first_inline_image(parts).ok_or(FailureCause::NoImage)
        }
        .await;

        result.map_err(|cause| {
            error!("Error generating comic image: {}", cause);
            GenerationError::ImageGeneration(cause)
        })
    }
}

/// Models sometimes wrap JSON in a markdown fence despite the declared MIME type.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn parse_expert(raw: &str) -> Result<Expert, FailureCause> {
    let payload: ExpertPayload = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| FailureCause::Malformed(e.to_string()))?;

    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(FailureCause::MissingField("name"))?;
    let description = payload
        .description
        .ok_or(FailureCause::MissingField("description"))?;

    Ok(Expert::new(name, description))
}

fn parse_script(raw: &str) -> Result<ComicDocument, FailureCause> {
    let payload: ScriptPayload = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| FailureCause::Malformed(e.to_string()))?;

    let title = payload.title.ok_or(FailureCause::MissingField("title"))?;
    let summary = payload.summary.ok_or(FailureCause::MissingField("summary"))?;
    let panels = payload
        .panels
        .into_iter()
        .map(|p| ComicPanel::new(p.scene, p.description, p.narration))
        .collect();

    ComicDocument::from_script(title, panels, summary).map_err(|e| match e {
        DomainError::EmptyScript => FailureCause::NoPanels,
        other => FailureCause::Malformed(other.to_string()),
    })
}

fn first_inline_image(parts: Vec<ResponsePart>) -> Option<ImageDataUri> {
    parts.into_iter().find_map(|part| match part {
        ResponsePart::InlineData { mime_type, data } if !data.is_empty() => {
            Some(ImageDataUri::new(mime_type, data))
        }
        _ => None,
    })
}
