//! The NER path (spec.md §4.3): sentence splitting, tokenization,
//! part-of-speech tagging, lemmatization, and named-entity recognition.
//!
//! No ML NER model ships with this crate (spec.md §1's own Non-goal:
//! "not a general NLP toolkit"), so this is a closed-class rule-based
//! tagger: sentence splitting on terminal punctuation/newlines, word
//! tokenization via `unicode-segmentation`, a capitalization-based POS
//! heuristic, and contiguous-same-tag-run detection for multi-token
//! entity spans — the same priority-ordered, stateless shape as
//! `charlenopires-poc_semantic::nlu::extractor::EntityExtractor`,
//! generalized to spec.md's NER_<TYPE>/POS_<TAG> origin vocabulary.

use crate::extract::stopwords::is_stop_word;
use crate::graph::{Concept, Origin};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Every character lowercase alphabetic.
    Lower,
    /// First character uppercase, remainder lowercase or numeric (e.g.
    /// "Neo4j").
    Title,
    /// Anything else: ALLCAPS, mixedCase, punctuation-bearing.
    Other,
}

fn shape_of(token: &str) -> Shape {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return Shape::Other;
    };
    if !first.is_uppercase() {
        if token.chars().all(|c| c.is_lowercase()) {
            return Shape::Lower;
        }
        return Shape::Other;
    }
    if chars.clone().all(|c| c.is_lowercase() || c.is_numeric()) {
        Shape::Title
    } else {
        Shape::Other
    }
}

fn is_purely_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_numeric())
}

/// Split text into sentences on `.`, `!`, `?`, or newlines.
fn split_sentences(text: &str) -> Vec<&str> {
    text.split(|c| c == '.' || c == '!' || c == '?' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Run the NER path over a chunk's text, emitting both multi-token NER
/// spans and single-token POS-tagged nouns (spec.md §4.3).
pub fn extract(text: &str) -> Vec<Concept> {
    let mut concepts = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for sentence in split_sentences(text) {
        let tokens: Vec<&str> = sentence.unicode_words().collect();
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            if shape_of(token) == Shape::Title {
                // Greedily extend a run of consecutive Title-case tokens.
                let mut j = i + 1;
                while j < tokens.len() && shape_of(tokens[j]) == Shape::Title {
                    j += 1;
                }
                if j - i >= 2 {
                    let span = tokens[i..j].join(" ");
                    if span.chars().count() > 2 && !is_stop_word(&span) {
                        push_if_new(&mut concepts, &mut seen, &span, Origin::ner("PROPN"));
                    }
                    i = j;
                    continue;
                }
                // Isolated single Title-case token: proper-noun POS tag.
                if token.chars().count() > 2 && !is_purely_numeric(token) && !is_stop_word(token) {
                    push_if_new(&mut concepts, &mut seen, token, Origin::pos("NNP"));
                }
                i += 1;
                continue;
            }

            if shape_of(token) == Shape::Lower
                && token.chars().count() > 2
                && !is_purely_numeric(token)
                && !is_stop_word(token)
                && !looks_like_function_word(token)
            {
                push_if_new(&mut concepts, &mut seen, token, Origin::pos("NN"));
            }
            i += 1;
        }
    }

    concepts
}

/// A short closed list of common function/verb words that a true POS
/// tagger would exclude from the noun class but our shape-only heuristic
/// cannot otherwise distinguish from nouns.
fn looks_like_function_word(word: &str) -> bool {
    const FUNCTION_WORDS: &[&str] = &[
        "is", "are", "was", "were", "be", "been", "being", "and", "or", "but", "not", "has",
        "have", "had", "can", "will", "would", "should", "could", "may", "might", "must", "do",
        "does", "did", "great", "good", "bad", "very", "just", "also", "uses", "use", "used",
    ];
    FUNCTION_WORDS.contains(&word)
}

fn push_if_new(concepts: &mut Vec<Concept>, seen: &mut HashSet<String>, surface: &str, origin: Origin) {
    let candidate = Concept::from_surface(surface, origin);
    if seen.insert(candidate.lemma.clone()) {
        concepts.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_token_title_case_run_becomes_propn_span() {
        let found = extract("A team visited San Francisco yesterday.");
        let span = found.iter().find(|c| c.lemma == "san_francisco");
        assert!(span.is_some());
        assert_eq!(span.unwrap().origin, Origin::ner("PROPN"));
    }

    #[test]
    fn isolated_title_case_token_becomes_proper_noun_pos() {
        let found = extract("Neo4j stores graphs efficiently.");
        let neo4j = found.iter().find(|c| c.lemma == "neo4j");
        assert!(neo4j.is_some());
        assert_eq!(neo4j.unwrap().origin, Origin::pos("NNP"));
    }

    #[test]
    fn lowercase_common_noun_becomes_pos_nn() {
        let found = extract("The graph stores concepts and relations.");
        assert!(found.iter().any(|c| c.lemma == "graph" && c.origin == Origin::pos("NN")));
        assert!(found.iter().any(|c| c.lemma == "concept" || c.lemma == "concepts"));
    }

    #[test]
    fn function_words_and_stop_words_are_excluded() {
        let found = extract("This is a great day for the team.");
        assert!(!found.iter().any(|c| c.lemma == "great" || c.lemma == "this"));
    }

    #[test]
    fn purely_numeric_tokens_are_excluded() {
        let found = extract("The year 2024 saw growth.");
        assert!(!found.iter().any(|c| c.lemma == "2024"));
    }

    #[test]
    fn dedup_within_chunk_is_by_lemma() {
        let found = extract("graph graph graph.");
        assert_eq!(found.iter().filter(|c| c.lemma == "graph").count(), 1);
    }
}
