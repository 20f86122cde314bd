//! Extract (S3): produce the set of Concepts mentioned in a Chunk
//! (spec.md §4.3).
//!
//! Composes two strategies: the preferred NER path (sentence/token/POS
//! annotation plus named-entity spans) and a heuristic path that always
//! runs to catch domain tokens the NER path misses. If the NER path
//! panics, the component falls back to the heuristic path alone and the
//! chunk is still processed (spec.md §4.3, §7: `ExtractionError` is
//! swallowed, never a pipeline failure).

mod heuristics;
mod ner;
mod stopwords;

use crate::graph::{Chunk, Concept, Origin};
use std::collections::HashSet;
use tracing::warn;

/// Extract the deduplicated (by lemma) set of Concepts mentioned in a
/// chunk, per spec.md §4.3's two-path composition rule.
pub fn extract_concepts(chunk: &Chunk) -> Vec<Concept> {
    extract_from_text(&chunk.text)
}

fn extract_from_text(text: &str) -> Vec<Concept> {
    let ner_outcome = std::panic::catch_unwind(|| ner::extract(text));
    let heuristic_concepts = heuristics::extract(text);

    let ner_concepts = match ner_outcome {
        Ok(concepts) => concepts,
        Err(_) => {
            warn!("NER path panicked; falling back to heuristic extraction only");
            return dedup_by_lemma(heuristic_concepts);
        }
    };

    combine(ner_concepts, heuristic_concepts)
}

/// Apply spec.md §4.3's combination rule: heuristic `camelCase`/`acronym`
/// findings are added whenever their lemma isn't already present from
/// the NER path; every other heuristic origin is suppressed once the
/// NER path has produced anything at all for the chunk.
fn combine(ner_concepts: Vec<Concept>, heuristic_concepts: Vec<Concept>) -> Vec<Concept> {
    let ner_produced_anything = !ner_concepts.is_empty();
    let mut seen: HashSet<String> = ner_concepts.iter().map(|c| c.lemma.clone()).collect();
    let mut combined = ner_concepts;

    for concept in heuristic_concepts {
        let is_camel_or_acronym = matches!(concept.origin, Origin::CamelCase | Origin::Acronym);
        let keep = if is_camel_or_acronym {
            !seen.contains(&concept.lemma)
        } else {
            !ner_produced_anything && !seen.contains(&concept.lemma)
        };
        if keep {
            seen.insert(concept.lemma.clone());
            combined.push(concept);
        }
    }

    combined
}

fn dedup_by_lemma(concepts: Vec<Concept>) -> Vec<Concept> {
    let mut seen = HashSet::new();
    concepts
        .into_iter()
        .filter(|c| seen.insert(c.lemma.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Chunk, Span};

    fn chunk_with(text: &str) -> Chunk {
        Chunk::new("c1", "d1", Span { start: 0, end: 0 }, text, "s", "h")
    }

    #[test]
    fn camel_case_and_acronym_survive_alongside_ner_findings() {
        let concepts = extract_concepts(&chunk_with("CamelCase API uses machine learning"));
        assert!(concepts.iter().any(|c| c.lemma == "camel_case" && c.origin == Origin::CamelCase));
        assert!(concepts.iter().any(|c| c.lemma == "api" && c.origin == Origin::Acronym));
        assert!(concepts.iter().any(|c| c.lemma == "machine" || c.lemma == "learning"));
    }

    #[test]
    fn heuristic_capitalized_origin_survives_when_ner_path_finds_nothing() {
        // "Neo4j" is an isolated Title-case token, picked up by the NER
        // path itself as a proper noun (POS_NNP) — present either way.
        let concepts = extract_concepts(&chunk_with("Neo4j is great"));
        assert!(concepts.iter().any(|c| c.lemma == "neo4j"));
    }

    #[test]
    fn single_concept_chunk_has_exactly_one_concept() {
        let concepts = extract_concepts(&chunk_with("Zylophone."));
        assert_eq!(concepts.len(), 1);
    }

    #[test]
    fn empty_text_produces_no_concepts() {
        let concepts = extract_concepts(&chunk_with(""));
        assert!(concepts.is_empty());
    }

    #[test]
    fn dedup_by_lemma_across_both_paths() {
        let concepts = dedup_by_lemma(vec![
            Concept::from_surface("Graph", Origin::pos("NNP")),
            Concept::from_surface("graph", Origin::Heuristic),
        ]);
        assert_eq!(concepts.len(), 1);
    }
}
