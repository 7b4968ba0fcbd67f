//! Fixed lists shown by the presentation layer

/// Starter questions offered next to the question prompt
pub const QUICK_START_QUESTIONS: [&str; 6] = [
    "Why do we have gravity?",
    "What is E=mc²?",
    "How do computers \"think\"?",
    "What is game theory?",
    "What is radioactivity?",
    "How does photosynthesis work?",
];

/// Captions rotated by the loading spinner while a comic is assembled
pub const LOADING_MESSAGES: [&str; 6] = [
    "Consulting with cosmic cartographers...",
    "Sketching out scientific scenes...",
    "Inking the panels of knowledge...",
    "Coloring in the details of the universe...",
    "Polishing the final frames...",
    "Binding the comic pages together...",
];

/// Look up a quick-start question by 1-based position
pub fn quick_start(position: usize) -> Option<&'static str> {
    position
        .checked_sub(1)
        .and_then(|i| QUICK_START_QUESTIONS.get(i).copied())
}

/// Loading caption for the given tick, cycling through the list
pub fn loading_message(tick: usize) -> &'static str {
    LOADING_MESSAGES[tick % LOADING_MESSAGES.len()]
}
