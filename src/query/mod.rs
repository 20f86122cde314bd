//! Query surface (S9, spec.md §4.8): three fixed, read-only projections
//! over the populated graph, mirroring
//! `plexus::query::{FindQuery, PathQuery, TraverseQuery}`'s
//! parametric-query-object shape — reimplemented against a `GraphReader`
//! instead of an in-memory `Context`.

mod memory;
mod neo4j;

pub use neo4j::Neo4jReader;

use crate::error::QueryError;
use async_trait::async_trait;
use serde::Serialize;

/// A Concept plus how many chunks mention it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConceptRecord {
    pub id: String,
    pub lemma: String,
    pub surface: String,
    pub origin: String,
    pub mention_count: u64,
}

/// One provenance entry: a chunk that mentions the looked-up concept.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceEntry {
    pub chunk_id: String,
    pub doc_id: String,
    pub source_uri: String,
    pub text: String,
}

/// One edge in a neighborhood traversal.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NeighborEdge {
    pub from: String,
    pub predicate: String,
    pub to: String,
    pub confidence: f64,
}

/// The subgraph reachable from a concept within a bounded number of
/// relation hops, filtered by minimum confidence.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    pub concept_ids: Vec<String>,
    pub edges: Vec<NeighborEdge>,
}

/// Read-only access to the populated graph, generalizing `GraphSink`'s
/// write path onto the three lookups spec.md §4.8 names. Implemented by
/// `InMemorySink` (directly, over its committed maps) and `Neo4jReader`
/// (a dedicated read connection, since reads need no transaction or
/// batching machinery).
#[async_trait]
pub trait GraphReader: Send + Sync {
    async fn find_concept(&self, lemma_or_id: &str) -> Result<Option<ConceptRecord>, QueryError>;

    async fn evidence_trail(&self, concept_id: &str) -> Result<Vec<EvidenceEntry>, QueryError>;

    async fn neighborhood(
        &self,
        concept_id: &str,
        depth: u32,
        min_confidence: f64,
    ) -> Result<Neighborhood, QueryError>;
}
