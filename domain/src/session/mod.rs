//! Session state machine and assembly events.
//!
//! - [`state::AppSession`] - the one live session and its transitions
//! - [`state::AppState`] - Idle / Loading / Success / Error
//! - [`event::ComicEvent`] - progress reported by the orchestrator

pub mod event;
pub mod state;
