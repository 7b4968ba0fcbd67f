//! Progress notification ports
//!
//! [`ComicEventSink`] receives events from a running assembly.
//! [`SessionObserver`] is told about every accepted change to the live
//! session; implementations live in the presentation layer.

use comic_domain::{AppSession, ComicEvent, Question, SubmissionId};

/// Receiver of assembly events for one submission
pub trait ComicEventSink: Send + Sync {
    fn emit(&self, event: ComicEvent);
}

/// No-op sink for when nobody is listening
pub struct NoEvents;

impl ComicEventSink for NoEvents {
    fn emit(&self, _event: ComicEvent) {}
}

/// Callback for state changes of the live session
///
/// Called while the session lock is held: implementations must not call
/// back into the session.
pub trait SessionObserver: Send + Sync {
    /// A submission was accepted and the session is now Loading
    fn on_submitted(&self, _submission: SubmissionId, _question: &Question) {}

    /// An event was applied; `session` is the state after applying it
    fn on_event(&self, event: &ComicEvent, session: &AppSession);

    /// The session returned to Idle
    fn on_reset(&self) {}
}

/// No-op observer
pub struct NoObserver;

impl SessionObserver for NoObserver {
    fn on_event(&self, _event: &ComicEvent, _session: &AppSession) {}
}
