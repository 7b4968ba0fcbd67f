//! Parsing of REPL input lines

use comic_domain::quick_start;
use std::path::PathBuf;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Free text: a question to explain
    Ask(String),
    /// `/1`..`/6`: one of the quick-start questions
    QuickStart(&'static str),
    Examples,
    Reset,
    Status,
    /// `/html <PATH>`: save the finished comic
    Html(PathBuf),
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line; blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Some(ReplCommand::Ask(line.to_string()));
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        let parsed = match name {
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "help" | "h" | "?" => ReplCommand::Help,
            "examples" | "e" => ReplCommand::Examples,
            "reset" | "new" => ReplCommand::Reset,
            "status" => ReplCommand::Status,
            "html" if !arg.is_empty() => ReplCommand::Html(PathBuf::from(arg)),
            digits if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                match digits.parse().ok().and_then(quick_start) {
                    Some(question) => ReplCommand::QuickStart(question),
                    None => ReplCommand::Unknown(line.to_string()),
                }
            }
            _ => ReplCommand::Unknown(line.to_string()),
        };
        Some(parsed)
    }
}
