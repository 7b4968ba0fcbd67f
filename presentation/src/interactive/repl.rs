//! REPL (Read-Eval-Print Loop) for interactive mode

use super::command::ReplCommand;
use crate::output::console::ConsoleFormatter;
use crate::output::html::HtmlRenderer;
use crate::runner::{SubmissionOutcome, submit_and_wait};
use colored::Colorize;
use comic_application::{ComicSession, GenerationGateway};
use comic_domain::{AppStatus, OutputFormat, QUICK_START_QUESTIONS};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 500;

/// Interactive comic REPL
pub struct ComicRepl<G: GenerationGateway + 'static> {
    session: Arc<ComicSession<G>>,
    format: OutputFormat,
    history_path: Option<PathBuf>,
}

impl<G: GenerationGateway + 'static> ComicRepl<G> {
    pub fn new(session: Arc<ComicSession<G>>) -> Self {
        Self {
            session,
            format: OutputFormat::Full,
            history_path: dirs::data_dir().map(|p| p.join("comic-tutor").join("history.txt")),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Override (or disable) the history file
    pub fn with_history(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("comic".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let Some(command) = ReplCommand::parse(&line) else {
                        continue;
                    };
                    if self.handle(command).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                #[allow(unreachable_patterns)]
                _ => {}
            }
        }

        Ok(())
    }

    /// Handle one command. Returns true if the REPL should exit.
    async fn handle(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Ask(question) => self.ask(&question).await,
            ReplCommand::QuickStart(question) => {
                println!("{} {}", ">".dimmed(), question);
                self.ask(question).await;
            }
            ReplCommand::Examples => Self::print_examples(),
            ReplCommand::Reset => {
                if self.session.reset() {
                    println!("Ready for a new question.");
                } else {
                    println!("Nothing to reset.");
                }
            }
            ReplCommand::Status => {
                println!("{}", self.session.with_session(ConsoleFormatter::format_status));
            }
            ReplCommand::Html(path) => self.save_html(&path),
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn ask(&self, question: &str) {
        // a finished comic or error is cleared by asking again
        if matches!(self.session.status(), AppStatus::Success | AppStatus::Error) {
            self.session.reset();
        }

        println!();
        match submit_and_wait(&self.session, question).await {
            SubmissionOutcome::Rejected => {
                println!("{}", "Still working on the previous comic.".yellow());
            }
            SubmissionOutcome::Cancelled => {
                println!("{}", "Cancelled. Ready for a new question.".yellow());
            }
            SubmissionOutcome::Finished(_) => {
                let output = self
                    .session
                    .with_session(|session| ConsoleFormatter::format_session(session, self.format));
                println!("{}", output);
            }
        }
        println!();
    }

    fn save_html(&self, path: &Path) {
        let Some(html) = self.session.with_session(HtmlRenderer::render_session) else {
            println!("There is no finished comic to save yet.");
            return;
        };
        match std::fs::write(path, html) {
            Ok(()) => println!("Saved {}", path.display()),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Comic Tutor - Interactive Mode       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Ask any question and get a four-panel comic that explains it.");
        println!("Press Ctrl-C while a comic is being made to start over.");
        println!();
        Self::print_examples();
        Self::print_help();
    }

    fn print_examples() {
        println!("Try one of these:");
        for (position, question) in QUICK_START_QUESTIONS.iter().enumerate() {
            println!("  /{}  {}", position + 1, question);
        }
        println!();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /examples       - List the quick-start questions");
        println!("  /1 .. /6        - Ask a quick-start question");
        println!("  /status         - Show what the session is doing");
        println!("  /reset          - Clear the current comic");
        println!("  /html <PATH>    - Save the finished comic as HTML");
        println!("  /help, /h, /?   - Show this help");
        println!("  /quit, /exit, /q - Exit");
        println!();
    }
}
