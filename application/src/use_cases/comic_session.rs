//! Comic session controller
//!
//! Owns the one live [`AppSession`] and drives it from user actions
//! (`submit`, `reset`) and from the orchestrator's events. All state changes
//! go through a single mutex, so each panel merge runs to completion before
//! the next one starts.

use crate::ports::generation_gateway::GenerationGateway;
use crate::ports::progress::{ComicEventSink, SessionObserver};
use crate::use_cases::assemble_comic::{AssembleComicInput, AssembleComicUseCase};
use comic_domain::{AppSession, AppStatus, ApplyOutcome, ComicEvent, SubmissionId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

struct SessionCore {
    session: Mutex<AppSession>,
    observer: Arc<dyn SessionObserver>,
}

impl SessionCore {
    fn lock(&self) -> MutexGuard<'_, AppSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, from: SubmissionId, event: ComicEvent) -> ApplyOutcome {
        let mut session = self.lock();
        let kind = event.kind();
        let observed = event.clone();
        let outcome = session.apply(from, event);
        match &outcome {
            ApplyOutcome::Applied => self.observer.on_event(&observed, &session),
            ApplyOutcome::Stale => debug!("Dropped stale {} event from {}", kind, from),
            ApplyOutcome::Rejected(e) => warn!("Rejected {} event from {}: {}", kind, from, e),
        }
        outcome
    }
}

/// Routes one submission's events into the session
struct SubmissionSink {
    submission: SubmissionId,
    core: Arc<SessionCore>,
}

impl ComicEventSink for SubmissionSink {
    fn emit(&self, event: ComicEvent) {
        self.core.apply(self.submission, event);
    }
}

/// Session controller: the presentation-facing interface of the core
pub struct ComicSession<G: GenerationGateway + 'static> {
    assembler: Arc<AssembleComicUseCase<G>>,
    core: Arc<SessionCore>,
    task: Mutex<Option<(SubmissionId, JoinHandle<()>)>>,
}

impl<G: GenerationGateway + 'static> ComicSession<G> {
    pub fn new(assembler: Arc<AssembleComicUseCase<G>>, observer: Arc<dyn SessionObserver>) -> Self {
        Self {
            assembler,
            core: Arc::new(SessionCore {
                session: Mutex::new(AppSession::new()),
                observer,
            }),
            task: Mutex::new(None),
        }
    }

    /// Submit a question.
    ///
    /// Returns `None` (and changes nothing) when the question is blank or a
    /// submission is already in flight. Must be called inside a tokio runtime.
    pub fn submit(&self, text: &str) -> Option<SubmissionId> {
        let (submission, question) = {
            let mut session = self.core.lock();
            let accepted = session.submit(text);
            if let Some((submission, question)) = &accepted {
                self.core.observer.on_submitted(*submission, question);
            }
            accepted?
        };
        info!("Submission {} accepted", submission);

        let input = AssembleComicInput::new(question)
            .with_audience(self.assembler.params().audience.clone());
        let assembler = Arc::clone(&self.assembler);
        let sink = SubmissionSink {
            submission,
            core: Arc::clone(&self.core),
        };

        let handle = tokio::spawn(async move {
            let terminal = match assembler.execute_with_events(input, &sink).await {
                Ok(assembled) => {
                    info!("Submission {} complete", submission);
                    ComicEvent::Completed {
                        expert: assembled.expert,
                        comic: assembled.comic,
                    }
                }
                Err(e) => {
                    error!("Submission {} failed: {:?}", submission, e);
                    ComicEvent::Failed(e.to_string())
                }
            };
            sink.emit(terminal);
        });

        *self.task_slot() = Some((submission, handle));
        Some(submission)
    }

    /// Return to Idle, discarding the current comic, expert, error and
    /// caption. An in-flight submission is abandoned, not stopped: its
    /// remote calls run to completion and their results are ignored.
    pub fn reset(&self) -> bool {
        let reset = {
            let mut session = self.core.lock();
            let reset = session.reset();
            if reset {
                self.core.observer.on_reset();
            }
            reset
        };
        if reset && let Some((submission, _detached)) = self.task_slot().take() {
            debug!("Abandoned submission {}", submission);
        }
        reset
    }

    /// Wait until the current submission (if any) has finished.
    ///
    /// Returns the status afterwards. A submission whose task died without
    /// reporting is moved to Error.
    pub async fn wait(&self) -> AppStatus {
        let pending = self.task_slot().take();
        if let Some((submission, handle)) = pending
            && let Err(e) = handle.await
        {
            error!("Submission {} task ended abnormally: {}", submission, e);
            self.core.apply(
                submission,
                ComicEvent::Failed("An unknown error occurred.".to_string()),
            );
        }
        self.status()
    }

    pub fn status(&self) -> AppStatus {
        self.core.lock().status()
    }

    /// Copy of the current session for rendering
    pub fn snapshot(&self) -> AppSession {
        self.core.lock().clone()
    }

    /// Read the session without copying it
    pub fn with_session<R>(&self, f: impl FnOnce(&AppSession) -> R) -> R {
        f(&self.core.lock())
    }

    fn task_slot(&self) -> MutexGuard<'_, Option<(SubmissionId, JoinHandle<()>)>> {
        self.task.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
