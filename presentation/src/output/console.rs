//! Console output formatter for finished comics

use colored::Colorize;
use comic_domain::{AppSession, AppState, ComicDocument, ComicPanel, Expert, OutputFormat, Question};
use serde::Serialize;

/// JSON shape of a session outcome
#[derive(Serialize)]
struct SessionView<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expert: Option<&'a Expert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comic: Option<&'a ComicDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Formats comics and session states for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render whatever the session currently holds in the requested format
    pub fn format_session(session: &AppSession, format: OutputFormat) -> String {
        if format == OutputFormat::Json {
            return Self::format_json(session);
        }
        match session.state() {
            AppState::Success {
                question,
                expert,
                comic,
            } => match format {
                OutputFormat::Text => Self::format_text(comic),
                _ => Self::format(question, expert, comic),
            },
            AppState::Error { message, .. } => Self::format_error(message),
            AppState::Loading { .. } | AppState::Idle => Self::format_status(session),
        }
    }

    /// Format the complete comic
    pub fn format(question: &Question, expert: &Expert, comic: &ComicDocument) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header(comic.title()));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            question.content()
        ));
        output.push_str(&format!(
            "{} {} - {}\n",
            "Your guide:".cyan().bold(),
            expert.name,
            expert.description
        ));

        let total = comic.panel_count();
        for (index, panel) in comic.panels().iter().enumerate() {
            output.push_str(&format!(
                "\n{}\n",
                format!("── Panel {} of {} ──", index + 1, total).yellow().bold()
            ));
            output.push_str(&format!("{}\n", panel.narration));
            output.push_str(&format!("{}\n", panel.description.dimmed()));
            output.push_str(&format!("{}\n", Self::image_badge(panel)));
        }

        output.push_str(&Self::section_header("What we learned"));
        output.push_str(&format!("\n{}\n", comic.summary()));

        output.push_str(&Self::footer());

        output
    }

    /// Title, narrations and summary without decoration
    pub fn format_text(comic: &ComicDocument) -> String {
        let mut output = format!("{}\n\n", comic.title());
        for (index, panel) in comic.panels().iter().enumerate() {
            output.push_str(&format!("{}. {}\n", index + 1, panel.narration));
        }
        output.push_str(&format!("\n{}\n", comic.summary()));
        output
    }

    /// Format as JSON
    pub fn format_json(session: &AppSession) -> String {
        let view = SessionView {
            status: session.status().as_str(),
            question: session.question().map(Question::content),
            expert: session.expert(),
            comic: session.comic(),
            error: session.error_message(),
        };
        serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// One-line description of where the session stands
    pub fn format_status(session: &AppSession) -> String {
        let status = session.status().as_str();
        let mut line = format!("{} {}", "Status:".cyan().bold(), status);
        if let Some(caption) = session.progress_caption() {
            line.push_str(&format!(" ({})", caption));
        }
        if let Some(comic) = session.comic() {
            line.push_str(&format!(
                " - \"{}\" {}/{} panels drawn",
                comic.title(),
                comic.illustrated_count(),
                comic.panel_count()
            ));
        }
        if let Some(message) = session.error_message() {
            line.push_str(&format!(" - {}", message));
        }
        line
    }

    /// Line printed when a panel's drawing arrives
    pub fn panel_ready(index: usize, total: usize, panel: &ComicPanel) -> String {
        format!(
            "{} Panel {}/{}: {}",
            "v".green(),
            index + 1,
            total,
            panel.narration
        )
    }

    fn image_badge(panel: &ComicPanel) -> String {
        match panel.image_url() {
            Some(image) => format!(
                "[image: {}, {:.1} KB]",
                image.mime_type(),
                image.decoded_len() as f64 / 1024.0
            )
            .green()
            .to_string(),
            None => "[no image]".red().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comic_domain::{ComicEvent, ImageDataUri, SubmissionId};

    fn sample_comic() -> ComicDocument {
        ComicDocument::from_script(
            "The Sky's Secret",
            vec![
                ComicPanel::new(1, "Rayleigh at a window", "Sunlight holds every color."),
                ComicPanel::new(2, "Light hits air", "Blue light bounces around the most!"),
            ],
            "Blue light scatters more, so the sky looks blue.",
        )
        .unwrap()
    }

    fn finished_session() -> AppSession {
        let mut session = AppSession::new();
        let (id, _) = session.submit("Why is the sky blue?").unwrap();
        let mut comic = sample_comic();
        comic.attach_image(0, ImageDataUri::new("image/png", "AAAA")).unwrap();
        comic.attach_image(1, ImageDataUri::new("image/png", "BBBB")).unwrap();
        session.apply(
            id,
            ComicEvent::Completed {
                expert: Expert::new("Lord Rayleigh", "Physicist who explained scattering"),
                comic,
            },
        );
        session
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_full_format_lists_every_panel() {
        plain();
        let output = ConsoleFormatter::format_session(&finished_session(), OutputFormat::Full);
        assert!(output.contains("The Sky's Secret"));
        assert!(output.contains("Your guide: Lord Rayleigh - Physicist who explained scattering"));
        assert!(output.contains("Panel 1 of 2"));
        assert!(output.contains("Panel 2 of 2"));
        assert!(output.contains("Blue light bounces around the most!"));
        assert!(output.contains("[image: image/png"));
        assert!(output.contains("What we learned"));
    }

    #[test]
    fn test_text_format_is_narration_only() {
        let output = ConsoleFormatter::format_session(&finished_session(), OutputFormat::Text);
        assert_eq!(
            output,
            "The Sky's Secret\n\n1. Sunlight holds every color.\n2. Blue light bounces around the most!\n\nBlue light scatters more, so the sky looks blue.\n"
        );
    }

    #[test]
    fn test_json_format_success() {
        let output = ConsoleFormatter::format_session(&finished_session(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["question"], "Why is the sky blue?");
        assert_eq!(value["expert"]["name"], "Lord Rayleigh");
        assert_eq!(value["comic"]["panels"][1]["imageUrl"], "data:image/png;base64,BBBB");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_json_format_error() {
        let mut session = AppSession::new();
        let (id, _) = session.submit("Why?").unwrap();
        session.apply(id, ComicEvent::Failed("Failed to draw a comic panel.".to_string()));

        let output = ConsoleFormatter::format_session(&session, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "Failed to draw a comic panel.");
        assert!(value.get("comic").is_none());
    }

    #[test]
    fn test_status_while_loading_shows_progress() {
        plain();
        let mut session = AppSession::new();
        let id = SubmissionId::new(1);
        session.submit("Why is the sky blue?").unwrap();
        session.apply(id, ComicEvent::ScriptReady(sample_comic()));
        session.apply(
            id,
            ComicEvent::PanelIllustrated {
                index: 1,
                image: ImageDataUri::new("image/png", "BBBB"),
            },
        );

        let line = ConsoleFormatter::format_status(&session);
        assert!(line.starts_with("Status: loading"));
        assert!(line.contains("\"The Sky's Secret\" 1/2 panels drawn"));
    }

    #[test]
    fn test_panel_ready_line() {
        plain();
        let panel = ComicPanel::new(3, "desc", "Tada!");
        assert_eq!(ConsoleFormatter::panel_ready(2, 4, &panel), "v Panel 3/4: Tada!");
    }
}
