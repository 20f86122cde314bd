//! The stop-word set spec.md §4.3 defines, exact and case-sensitive for
//! the capitalized heuristics.

pub const STOP_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "They", "There", "Then", "When", "Where", "What",
    "Which", "Who", "Why", "How", "Figure", "Table", "Section", "Chapter", "Page", "For", "From",
    "With", "Without", "About",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
