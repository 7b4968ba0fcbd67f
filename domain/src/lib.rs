//! Domain layer for comic-tutor
//!
//! This crate contains the core entities, value objects and the session
//! state machine. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! - **Expert**: the famous guide who narrates the comic
//! - **ComicDocument**: title, a fixed sequence of panels, and a summary;
//!   panels gain their images one at a time as illustrations arrive
//! - **AppSession**: the Idle / Loading / Success / Error lifecycle of the
//!   single live submission

pub mod comic;
pub mod config;
pub mod core;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use comic::{
    catalog::{LOADING_MESSAGES, QUICK_START_QUESTIONS, loading_message, quick_start},
    entities::{ComicDocument, ComicPanel, Expert},
    image::ImageDataUri,
};
pub use config::OutputFormat;
pub use core::{audience::AudienceLevel, error::DomainError, model::Model, question::Question};
pub use prompt::{ComicPromptTemplate, ComicSchemas};
pub use session::{
    event::{ComicEvent, ProgressCaption, SubmissionId},
    state::{AppSession, AppState, AppStatus, ApplyOutcome},
};
