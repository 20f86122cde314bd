//! Prompt construction for a relation candidate (spec.md §4.5, §6).

use crate::graph::RelationCandidate;

/// Build the completion prompt for a candidate, instructing the model to
/// pick a predicate from `predicate_set` and return a single JSON object
/// with `predicate`, `confidence`, and `evidence` fields (spec.md §6's
/// wire protocol).
pub fn build_prompt(candidate: &RelationCandidate, predicate_set: &[String]) -> String {
    let allowed = predicate_set.join(", ");
    format!(
        "Two concepts co-occur in the following text:\n\
         \"{evidence}\"\n\n\
         Concept A: {a}\n\
         Concept B: {b}\n\n\
         Choose the single predicate from this set that best describes the \
         relationship from A to B: [{allowed}]. If none applies, answer \
         \"related_to\". Respond with exactly one JSON object of the form \
         {{\"predicate\": <string>, \"confidence\": <number between 0 and 1>, \
         \"evidence\": <short quote from the text>}}.",
        evidence = candidate.evidence,
        a = candidate.pair.a.lemma,
        b = candidate.pair.b.lemma,
        allowed = allowed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Concept, CoOccurrence, Origin};

    fn candidate() -> RelationCandidate {
        let a = Concept::from_surface("neo4j", Origin::CamelCase);
        let b = Concept::from_surface("graph", Origin::pos("NN"));
        let pair = CoOccurrence::new(a, b, "c1");
        RelationCandidate::new(pair, "Neo4j stores graphs efficiently.")
    }

    #[test]
    fn prompt_includes_both_lemmas_and_evidence() {
        let predicate_set = vec!["uses".to_string(), "related_to".to_string()];
        let prompt = build_prompt(&candidate(), &predicate_set);
        assert!(prompt.contains("neo4j"));
        assert!(prompt.contains("graph"));
        assert!(prompt.contains("Neo4j stores graphs efficiently."));
        assert!(prompt.contains("uses"));
    }
}
