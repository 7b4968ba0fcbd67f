//! Events produced while a comic is assembled

use crate::comic::entities::{ComicDocument, Expert};
use crate::comic::image::ImageDataUri;

/// Identifier of one submission within a session.
///
/// Increases monotonically; events tagged with an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(u64);

impl SubmissionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One step of progress reported by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComicEvent {
    /// Advisory caption; carries no control semantics
    Progress(String),
    ExpertIdentified(Expert),
    /// Script generated; panels have no images yet
    ScriptReady(ComicDocument),
    PanelIllustrated { index: usize, image: ImageDataUri },
    Completed { expert: Expert, comic: ComicDocument },
    Failed(String),
}

impl ComicEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ComicEvent::Progress(_) => "progress",
            ComicEvent::ExpertIdentified(_) => "expert_identified",
            ComicEvent::ScriptReady(_) => "script_ready",
            ComicEvent::PanelIllustrated { .. } => "panel_illustrated",
            ComicEvent::Completed { .. } => "completed",
            ComicEvent::Failed(_) => "failed",
        }
    }

    /// True for events that end a submission
    pub fn is_terminal(&self) -> bool {
        matches!(self, ComicEvent::Completed { .. } | ComicEvent::Failed(_))
    }
}

/// Human-readable progress captions
pub struct ProgressCaption;

impl ProgressCaption {
    pub fn finding_expert() -> String {
        "Finding the perfect expert guide...".to_string()
    }

    pub fn crafting_story(expert_name: &str) -> String {
        format!("Crafting your story with {}...", expert_name)
    }

    /// `index` is 0-based; the caption is 1-based
    pub fn drawing_panel(index: usize, total: usize) -> String {
        format!("Drawing panel {} of {}...", index + 1, total)
    }

    pub fn finalizing() -> String {
        "Finalizing your comic!".to_string()
    }
}
