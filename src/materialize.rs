//! Materialize (S6): four pure functions converting Chunks, Concepts,
//! Mentions, and ScoredRelations into GraphWrite commands (spec.md §4.6).
//!
//! A Mention carries no data beyond the (chunkId, conceptId) pair it
//! joins (spec.md §3), so it has no dedicated type here — `mention_write`
//! takes the two ids directly.

use crate::graph::{
    canonical_relationship_type, Chunk, Concept, GraphWrite, Props, ScoredRelation,
};
use serde_json::json;

/// Chunk → UpsertNode(`Chunk`, chunkId, {...}) (spec.md §4.6).
pub fn chunk_write(chunk: &Chunk) -> GraphWrite {
    let mut props: Props = Props::new();
    props.insert("chunkId".to_string(), json!(chunk.chunk_id));
    props.insert("docId".to_string(), json!(chunk.doc_id));
    props.insert("text".to_string(), json!(chunk.text));
    props.insert("sourceUri".to_string(), json!(chunk.source_uri));
    props.insert("hash".to_string(), json!(chunk.hash));
    props.insert("spanStart".to_string(), json!(chunk.span.start));
    props.insert("spanEnd".to_string(), json!(chunk.span.end));
    GraphWrite::upsert_node("Chunk", chunk.chunk_id.clone(), props)
}

/// Concept → UpsertNode(`Concept`, conceptId, {...}) (spec.md §4.6).
pub fn concept_write(concept: &Concept) -> GraphWrite {
    let mut props: Props = Props::new();
    props.insert("conceptId".to_string(), json!(concept.id));
    props.insert("lemma".to_string(), json!(concept.lemma));
    props.insert("surface".to_string(), json!(concept.surface));
    props.insert("origin".to_string(), json!(concept.origin.as_tag()));
    GraphWrite::upsert_node("Concept", concept.id.clone(), props)
}

/// (Chunk, Mention) → UpsertEdge(`Chunk`, chunkId, `MENTIONS`, `Concept`,
/// conceptId, {}) (spec.md §4.6).
pub fn mention_write(chunk_id: &str, concept_id: &str) -> GraphWrite {
    GraphWrite::upsert_edge(
        "Chunk",
        chunk_id.to_string(),
        "MENTIONS",
        "Concept",
        concept_id.to_string(),
        Props::new(),
    )
}

/// ScoredRelation → UpsertEdge(`Concept`, a.conceptId, predicate
/// (canonicalized), `Concept`, b.conceptId, {confidence, evidence})
/// (spec.md §4.6).
pub fn relation_write(relation: &ScoredRelation) -> GraphWrite {
    let mut props: Props = Props::new();
    props.insert("confidence".to_string(), json!(relation.confidence));
    props.insert("evidence".to_string(), json!(relation.evidence));
    GraphWrite::upsert_edge(
        "Concept",
        relation.a.id.clone(),
        canonical_relationship_type(&relation.predicate),
        "Concept",
        relation.b.id.clone(),
        props,
    )
}
