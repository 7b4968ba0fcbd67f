//! Interactive mode
//!
//! Provides a line-editor based REPL that keeps one comic session alive
//! across questions.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ComicRepl;
