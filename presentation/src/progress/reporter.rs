//! Progress reporting while a comic is assembled

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use comic_application::SessionObserver;
use comic_domain::{AppSession, ComicEvent, Question, SubmissionId, loading_message};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How often the light-hearted caption under the spinner changes
pub const CAPTION_ROTATION: Duration = Duration::from_millis(2500);

/// Line to print for an event, if it deserves one.
///
/// Shared by the spinner and plain reporters so both tell the same story.
fn event_line(event: &ComicEvent, session: &AppSession) -> Option<String> {
    match event {
        ComicEvent::ExpertIdentified(expert) => Some(format!(
            "{} {} - {}",
            "Guide:".cyan().bold(),
            expert.name,
            expert.description
        )),
        ComicEvent::ScriptReady(comic) => Some(format!(
            "{} {} ({} panels)",
            "Story:".cyan().bold(),
            comic.title(),
            comic.panel_count()
        )),
        ComicEvent::PanelIllustrated { index, .. } => {
            let comic = session.comic()?;
            let panel = comic.panels().get(*index)?;
            Some(ConsoleFormatter::panel_ready(*index, comic.panel_count(), panel))
        }
        ComicEvent::Failed(message) => Some(format!("{} {}", "x".red(), message)),
        ComicEvent::Progress(_) | ComicEvent::Completed { .. } => None,
    }
}

struct ActiveSpinner {
    bar: ProgressBar,
    rotation: CancellationToken,
}

impl ActiveSpinner {
    fn finish(self) {
        self.rotation.cancel();
        self.bar.finish_and_clear();
    }
}

/// Spinner with the current step, a rotating caption, and a line per
/// finished panel
pub struct ProgressReporter {
    active: Mutex<Option<ActiveSpinner>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg:.bold}  {prefix:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn slot(&self) -> MutexGuard<'_, Option<ActiveSpinner>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_prefix(loading_message(0));
        bar.enable_steady_tick(Duration::from_millis(100));

        let rotation = CancellationToken::new();
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let bar = bar.clone();
            let token = rotation.clone();
            runtime.spawn(async move {
                let mut interval = tokio::time::interval(CAPTION_ROTATION);
                // first tick completes immediately
                interval.tick().await;
                let mut tick = 0usize;
                loop {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = interval.tick() => {
                            tick += 1;
                            bar.set_prefix(loading_message(tick));
                        }
                    }
                }
            });
        }

        if let Some(previous) = self.slot().replace(ActiveSpinner { bar, rotation }) {
            previous.finish();
        }
    }

    fn stop(&self) {
        if let Some(active) = self.slot().take() {
            active.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for ProgressReporter {
    fn on_submitted(&self, _submission: SubmissionId, _question: &Question) {
        self.start();
    }

    fn on_event(&self, event: &ComicEvent, session: &AppSession) {
        if event.is_terminal() {
            self.stop();
            return;
        }
        let slot = self.slot();
        let Some(active) = slot.as_ref() else {
            return;
        };
        if let ComicEvent::Progress(caption) = event {
            active.bar.set_message(caption.clone());
        }
        if let Some(line) = event_line(event, session) {
            active.bar.println(line);
        }
    }

    fn on_reset(&self) {
        self.stop();
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl SessionObserver for SimpleProgress {
    fn on_submitted(&self, submission: SubmissionId, question: &Question) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            format!("Submission {}:", submission).bold(),
            question.content()
        );
    }

    fn on_event(&self, event: &ComicEvent, session: &AppSession) {
        match event {
            ComicEvent::Progress(caption) => eprintln!("  {}", caption.dimmed()),
            ComicEvent::Completed { .. } => eprintln!(),
            _ => {
                if let Some(line) = event_line(event, session) {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    fn on_reset(&self) {
        eprintln!("{}", "Session reset.".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comic_domain::{ComicDocument, ComicPanel, Expert, ImageDataUri};

    fn loading_with_script() -> (AppSession, SubmissionId) {
        let mut session = AppSession::new();
        let (id, _) = session.submit("How do bees make honey?").unwrap();
        let comic = ComicDocument::from_script(
            "Buzzing Kitchen",
            vec![
                ComicPanel::new(1, "Bee on flower", "Bees sip nectar."),
                ComicPanel::new(2, "Hive", "They fan it until it thickens!"),
            ],
            "Honey is nectar dried by busy bees.",
        )
        .unwrap();
        session.apply(id, ComicEvent::ScriptReady(comic));
        (session, id)
    }

    #[test]
    fn test_event_line_for_panel_uses_session_snapshot() {
        colored::control::set_override(false);
        let (mut session, id) = loading_with_script();
        let event = ComicEvent::PanelIllustrated {
            index: 1,
            image: ImageDataUri::new("image/png", "AAAA"),
        };
        session.apply(id, event.clone());

        assert_eq!(
            event_line(&event, &session).as_deref(),
            Some("v Panel 2/2: They fan it until it thickens!")
        );
    }

    #[test]
    fn test_event_line_for_expert_and_script() {
        colored::control::set_override(false);
        let (session, _) = loading_with_script();
        let expert = ComicEvent::ExpertIdentified(Expert::new("Karl von Frisch", "Bee scientist"));
        assert_eq!(
            event_line(&expert, &session).as_deref(),
            Some("Guide: Karl von Frisch - Bee scientist")
        );

        let script = ComicEvent::ScriptReady(session.comic().unwrap().clone());
        assert_eq!(
            event_line(&script, &session).as_deref(),
            Some("Story: Buzzing Kitchen (2 panels)")
        );
    }

    #[test]
    fn test_progress_has_no_line() {
        let (session, _) = loading_with_script();
        assert!(event_line(&ComicEvent::Progress("Drawing...".to_string()), &session).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reporter_lifecycle_is_idempotent() {
        let reporter = ProgressReporter::new();
        let (session, id) = loading_with_script();
        let question = session.question().unwrap().clone();

        reporter.on_submitted(id, &question);
        assert!(reporter.slot().is_some());

        reporter.on_event(&ComicEvent::Progress("Finding...".to_string()), &session);
        tokio::time::advance(CAPTION_ROTATION * 2).await;

        reporter.on_event(&ComicEvent::Failed("boom".to_string()), &session);
        assert!(reporter.slot().is_none());

        // a reset after the spinner is gone does nothing
        reporter.on_reset();
        assert!(reporter.slot().is_none());
    }
}
