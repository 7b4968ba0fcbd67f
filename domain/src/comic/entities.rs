//! Comic domain entities

use super::image::ImageDataUri;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Guide persona that narrates the comic (Entity)
///
/// `description` is a one-sentence visual summary handed to the illustrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expert {
    pub name: String,
    pub description: String,
}

impl Expert {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One scene of the comic plus its caption (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComicPanel {
    /// 1-based scene number
    pub scene: u32,
    /// Visual prompt for the illustrator
    pub description: String,
    /// Caption text
    pub narration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<ImageDataUri>,
}

impl ComicPanel {
    pub fn new(scene: u32, description: impl Into<String>, narration: impl Into<String>) -> Self {
        Self {
            scene,
            description: description.into(),
            narration: narration.into(),
            image_url: None,
        }
    }

    pub fn image_url(&self) -> Option<&ImageDataUri> {
        self.image_url.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }

    /// Set the illustration. Absent → present only; re-attaching the same
    /// image is accepted, a different one is rejected.
    pub fn attach_image(&mut self, image: ImageDataUri) -> Result<(), DomainError> {
        match &self.image_url {
            None => {
                self.image_url = Some(image);
                Ok(())
            }
            Some(existing) if *existing == image => Ok(()),
            Some(_) => Err(DomainError::ImageAlreadySet { scene: self.scene }),
        }
    }
}

/// A titled comic with a fixed sequence of panels (Aggregate)
///
/// The panel count is fixed at creation. Afterwards only per-panel images
/// change, and only through [`ComicDocument::attach_image`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawComicDocument")]
pub struct ComicDocument {
    title: String,
    panels: Vec<ComicPanel>,
    summary: String,
}

#[derive(Deserialize)]
struct RawComicDocument {
    title: String,
    panels: Vec<ComicPanel>,
    summary: String,
}

impl TryFrom<RawComicDocument> for ComicDocument {
    type Error = DomainError;

    fn try_from(raw: RawComicDocument) -> Result<Self, Self::Error> {
        Self::from_script(raw.title, raw.panels, raw.summary)
    }
}

impl ComicDocument {
    /// Create a document from a generated script.
    ///
    /// An empty panel list is rejected, as is a scene number that is zero or
    /// repeats an earlier panel's.
    pub fn from_script(
        title: impl Into<String>,
        panels: Vec<ComicPanel>,
        summary: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if panels.is_empty() {
            return Err(DomainError::EmptyScript);
        }
        let mut seen = HashSet::with_capacity(panels.len());
        if let Some(bad) = panels.iter().find(|p| p.scene == 0 || !seen.insert(p.scene)) {
            return Err(DomainError::InvalidScene { scene: bad.scene });
        }
        Ok(Self {
            title: title.into(),
            panels,
            summary: summary.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn panels(&self) -> &[ComicPanel] {
        &self.panels
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Merge an illustration into the panel at `index`, leaving the rest untouched.
    pub fn attach_image(&mut self, index: usize, image: ImageDataUri) -> Result<(), DomainError> {
        let len = self.panels.len();
        let panel = self
            .panels
            .get_mut(index)
            .ok_or(DomainError::PanelOutOfRange { index, len })?;
        panel.attach_image(image)
    }

    pub fn illustrated_count(&self) -> usize {
        self.panels.iter().filter(|p| p.has_image()).count()
    }

    /// True when every panel carries an image
    pub fn is_complete(&self) -> bool {
        self.panels.iter().all(ComicPanel::has_image)
    }
}
