//! The heuristic extraction path (spec.md §4.3) — regex-matched tokens
//! over the raw chunk text. Always runs, independent of the NER path, to
//! catch domain tokens a sentence/POS tagger misses.
//!
//! Priority-ordered strategies with incremental lowercase dedup, the
//! shape `charlenopires-poc_semantic::nlu::extractor::EntityExtractor`
//! uses for its quoted-text / capitalized / n-gram / single-word passes,
//! generalized to this spec's four origin tags.

use crate::extract::stopwords::is_stop_word;
use crate::graph::{Concept, Origin};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn capitalized_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z][a-zA-Z0-9]*(?:\s+[A-Z][a-zA-Z0-9]*)*\b").unwrap())
}

fn camel_case_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z][a-z0-9]+(?:[A-Z][a-z0-9]*)+\b").unwrap())
}

fn acronym_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-Z]{2,6}\b").unwrap())
}

fn technical_term_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-z][a-z0-9]*[A-Z][a-zA-Z0-9]*\b").unwrap())
}

/// Run all four heuristic strategies over `text`, in priority order,
/// deduplicating by lowercase surface as each strategy runs (spec.md
/// §4.3's per-strategy de-dup, generalized from the pack's extractor).
pub fn extract(text: &str) -> Vec<Concept> {
    let mut concepts = Vec::new();
    let mut seen = HashSet::new();

    // CamelCase identifiers, e.g. "CamelCase".
    for m in camel_case_re().find_iter(text) {
        push_if_new(&mut concepts, &mut seen, m.as_str(), Origin::CamelCase);
    }

    // Uppercase acronyms of length 2-6.
    for m in acronym_re().find_iter(text) {
        push_if_new(&mut concepts, &mut seen, m.as_str(), Origin::Acronym);
    }

    // mixedCase technical terms: lowercase prefix then CamelCase.
    for m in technical_term_re().find_iter(text) {
        // The technical-term pattern is a superset of camelCase matches
        // with a lowercase first letter; camel_case_re already requires
        // an uppercase first letter so these families are disjoint.
        push_if_new(&mut concepts, &mut seen, m.as_str(), Origin::TechnicalTerm);
    }

    // Capitalized words/sequences not in the stop-word list, length > 2.
    for m in capitalized_re().find_iter(text) {
        let surface = m.as_str();
        if surface.chars().count() <= 2 || is_stop_word(surface) {
            continue;
        }
        push_if_new(&mut concepts, &mut seen, surface, Origin::Heuristic);
    }

    concepts
}

fn push_if_new(concepts: &mut Vec<Concept>, seen: &mut HashSet<String>, surface: &str, origin: Origin) {
    let lower = surface.to_lowercase();
    if seen.insert(lower) {
        concepts.push(Concept::from_surface(surface, origin));
    }
}
