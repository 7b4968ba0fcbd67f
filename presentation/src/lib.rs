//! Presentation layer for comic-tutor
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive REPL.

pub mod cli;
pub mod interactive;
pub mod output;
pub mod progress;
pub mod runner;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use interactive::{ComicRepl, ReplCommand};
pub use output::{console::ConsoleFormatter, html::HtmlRenderer};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use runner::{SubmissionOutcome, submit_and_wait};
