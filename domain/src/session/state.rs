//! Application state machine
//!
//! ```text
//! Idle --submit(question)--> Loading --Completed--> Success --reset--> Idle
//!                               |
//!                               +------Failed-----> Error   --reset--> Idle
//! ```
//!
//! `submit` is ignored unless the session is Idle and the question is
//! non-blank. Events are tagged with the [`SubmissionId`] that produced them;
//! anything not addressed to the submission currently Loading is stale and
//! dropped.

use super::event::{ComicEvent, SubmissionId};
use crate::comic::entities::{ComicDocument, Expert};
use crate::core::error::DomainError;
use crate::core::question::Question;

/// Lifecycle state of the current submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Awaiting a question
    Idle,
    /// Submission in flight; the partial comic is readable as soon as the
    /// script exists
    Loading {
        submission: SubmissionId,
        question: Question,
        caption: String,
        expert: Option<Expert>,
        comic: Option<ComicDocument>,
    },
    /// Every panel illustrated
    Success {
        question: Question,
        expert: Expert,
        comic: ComicDocument,
    },
    /// Terminal failure; no partial comic is kept
    Error {
        question: Question,
        message: String,
        expert: Option<Expert>,
    },
}

/// Discriminant of [`AppState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl AppStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Idle => "idle",
            AppStatus::Loading => "loading",
            AppStatus::Success => "success",
            AppStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of feeding an event to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Event belongs to an abandoned submission or arrived outside Loading
    Stale,
    /// Event addressed the live submission but could not be merged
    Rejected(DomainError),
}

/// The single live session (Aggregate)
#[derive(Debug, Clone)]
pub struct AppSession {
    last_submission: SubmissionId,
    state: AppState,
}

impl Default for AppSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AppSession {
    pub fn new() -> Self {
        Self {
            last_submission: SubmissionId::new(0),
            state: AppState::Idle,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn status(&self) -> AppStatus {
        match self.state {
            AppState::Idle => AppStatus::Idle,
            AppState::Loading { .. } => AppStatus::Loading,
            AppState::Success { .. } => AppStatus::Success,
            AppState::Error { .. } => AppStatus::Error,
        }
    }

    /// Submission currently in flight
    pub fn current_submission(&self) -> Option<SubmissionId> {
        match &self.state {
            AppState::Loading { submission, .. } => Some(*submission),
            _ => None,
        }
    }

    /// Start a new submission.
    ///
    /// Returns the new id and validated question, or `None` when the
    /// session is not Idle or the text is blank (state unchanged).
    pub fn submit(&mut self, text: &str) -> Option<(SubmissionId, Question)> {
        if !matches!(self.state, AppState::Idle) {
            return None;
        }
        let question = Question::try_new(text)?;
        let submission = self.last_submission.next();
        self.last_submission = submission;
        self.state = AppState::Loading {
            submission,
            question: question.clone(),
            caption: String::new(),
            expert: None,
            comic: None,
        };
        Some((submission, question))
    }

    /// Feed an orchestrator event into the state machine.
    pub fn apply(&mut self, from: SubmissionId, event: ComicEvent) -> ApplyOutcome {
        let AppState::Loading {
            submission,
            question,
            caption,
            expert,
            comic,
        } = &mut self.state
        else {
            return ApplyOutcome::Stale;
        };
        if *submission != from {
            return ApplyOutcome::Stale;
        }

        let next = match event {
            ComicEvent::Progress(text) => {
                *caption = text;
                None
            }
            ComicEvent::ExpertIdentified(found) => {
                *expert = Some(found);
                None
            }
            ComicEvent::ScriptReady(script) => {
                *comic = Some(script);
                None
            }
            ComicEvent::PanelIllustrated { index, image } => {
                let Some(doc) = comic.as_mut() else {
                    return ApplyOutcome::Rejected(DomainError::PanelOutOfRange { index, len: 0 });
                };
                if let Err(e) = doc.attach_image(index, image) {
                    return ApplyOutcome::Rejected(e);
                }
                None
            }
            ComicEvent::Completed {
                expert: final_expert,
                comic: final_comic,
            } => Some(AppState::Success {
                question: question.clone(),
                expert: final_expert,
                comic: final_comic,
            }),
            ComicEvent::Failed(message) => Some(AppState::Error {
                question: question.clone(),
                message,
                expert: expert.take(),
            }),
        };

        if let Some(next) = next {
            self.state = next;
        }
        ApplyOutcome::Applied
    }

    /// Return to Idle, clearing question, comic, expert, error and caption.
    ///
    /// From Loading this abandons the in-flight submission; its later events
    /// become stale. Returns false when already Idle.
    pub fn reset(&mut self) -> bool {
        if matches!(self.state, AppState::Idle) {
            return false;
        }
        self.state = AppState::Idle;
        true
    }

    // ==================== Presentation Accessors ====================

    pub fn question(&self) -> Option<&Question> {
        match &self.state {
            AppState::Idle => None,
            AppState::Loading { question, .. }
            | AppState::Success { question, .. }
            | AppState::Error { question, .. } => Some(question),
        }
    }

    /// Current comic snapshot, possibly partial while Loading
    pub fn comic(&self) -> Option<&ComicDocument> {
        match &self.state {
            AppState::Loading { comic, .. } => comic.as_ref(),
            AppState::Success { comic, .. } => Some(comic),
            AppState::Idle | AppState::Error { .. } => None,
        }
    }

    pub fn expert(&self) -> Option<&Expert> {
        match &self.state {
            AppState::Loading { expert, .. } | AppState::Error { expert, .. } => expert.as_ref(),
            AppState::Success { expert, .. } => Some(expert),
            AppState::Idle => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            AppState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn progress_caption(&self) -> Option<&str> {
        match &self.state {
            AppState::Loading { caption, .. } if !caption.is_empty() => Some(caption),
            _ => None,
        }
    }
}
