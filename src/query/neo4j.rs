//! `GraphReader` over a dedicated `neo4rs` read connection. Reads need
//! neither batching nor an explicit transaction, so this is a separate,
//! smaller connection wrapper rather than a mode of `Neo4jSink`.

use super::{ConceptRecord, EvidenceEntry, GraphReader, NeighborEdge, Neighborhood};
use crate::config::GraphConfig;
use crate::error::QueryError;
use async_trait::async_trait;
use neo4rs::{query, Graph};
use std::collections::BTreeSet;
use tracing::info;

pub struct Neo4jReader {
    graph: Graph,
}

/// Build a driver config pinned to `graph.database` (spec.md §4.7, §6:
/// "Session is pinned to a named database").
fn connection_config(config: &GraphConfig) -> Result<neo4rs::Config, QueryError> {
    neo4rs::config()
        .uri(&config.uri)
        .user(&config.user)
        .password(&config.password)
        .db(config.database.as_str())
        .build()
        .map_err(|source| QueryError::Internal(Box::new(source)))
}

impl Neo4jReader {
    pub async fn open(config: &GraphConfig) -> Result<Self, QueryError> {
        let graph = Graph::connect(connection_config(config)?)
            .await
            .map_err(|source| QueryError::Internal(Box::new(source)))?;
        info!(database = %config.database, "query reader opened");
        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphReader for Neo4jReader {
    async fn find_concept(&self, lemma_or_id: &str) -> Result<Option<ConceptRecord>, QueryError> {
        let cypher = "MATCH (c:Concept) WHERE c.conceptId = $id OR c.lemma = $id \
             OPTIONAL MATCH (m:Chunk)-[:MENTIONS]->(c) \
             RETURN c.conceptId AS id, c.lemma AS lemma, c.surface AS surface, \
                    c.origin AS origin, count(m) AS mentionCount \
             LIMIT 1";

        let mut stream = self
            .graph
            .execute(query(cypher).param("id", lemma_or_id))
            .await
            .map_err(|source| QueryError::Internal(Box::new(source)))?;

        let Some(row) = stream
            .next()
            .await
            .map_err(|source| QueryError::Internal(Box::new(source)))?
        else {
            return Ok(None);
        };

        Ok(Some(ConceptRecord {
            id: row.get("id").unwrap_or_default(),
            lemma: row.get("lemma").unwrap_or_default(),
            surface: row.get("surface").unwrap_or_default(),
            origin: row.get("origin").unwrap_or_default(),
            mention_count: row.get::<i64>("mentionCount").unwrap_or(0).max(0) as u64,
        }))
    }

    async fn evidence_trail(&self, concept_id: &str) -> Result<Vec<EvidenceEntry>, QueryError> {
        let cypher = "MATCH (ch:Chunk)-[:MENTIONS]->(:Concept {conceptId: $id}) \
             RETURN ch.chunkId AS chunkId, ch.docId AS docId, ch.sourceUri AS sourceUri, ch.text AS text";

        let mut stream = self
            .graph
            .execute(query(cypher).param("id", concept_id))
            .await
            .map_err(|source| QueryError::Internal(Box::new(source)))?;

        let mut entries = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(|source| QueryError::Internal(Box::new(source)))?
        {
            entries.push(EvidenceEntry {
                chunk_id: row.get("chunkId").unwrap_or_default(),
                doc_id: row.get("docId").unwrap_or_default(),
                source_uri: row.get("sourceUri").unwrap_or_default(),
                text: row.get("text").unwrap_or_default(),
            });
        }
        Ok(entries)
    }

    /// Breadth-first, hop by hop: each hop is a single-id scalar-param
    /// query (`$id`, `$minConfidence`), avoiding any dependency on how
    /// `neo4rs` represents list-valued Bolt parameters.
    async fn neighborhood(
        &self,
        concept_id: &str,
        depth: u32,
        min_confidence: f64,
    ) -> Result<Neighborhood, QueryError> {
        let cypher = "MATCH (a:Concept {conceptId: $id})-[r]-(b:Concept) \
             WHERE r.confidence >= $minConfidence \
             RETURN a.conceptId AS from, type(r) AS predicate, b.conceptId AS to, r.confidence AS confidence";

        let mut visited: BTreeSet<String> = BTreeSet::new();
        visited.insert(concept_id.to_string());
        let mut frontier: Vec<String> = vec![concept_id.to_string()];
        let mut edges = Vec::new();

        for _ in 0..depth {
            let mut next_frontier = Vec::new();
            for id in &frontier {
                let mut stream = self
                    .graph
                    .execute(
                        query(cypher)
                            .param("id", id.clone())
                            .param("minConfidence", min_confidence),
                    )
                    .await
                    .map_err(|source| QueryError::Internal(Box::new(source)))?;

                while let Some(row) = stream
                    .next()
                    .await
                    .map_err(|source| QueryError::Internal(Box::new(source)))?
                {
                    let from: String = row.get("from").unwrap_or_default();
                    let to: String = row.get("to").unwrap_or_default();
                    let predicate: String = row.get("predicate").unwrap_or_default();
                    let confidence: f64 = row.get("confidence").unwrap_or(0.0);

                    edges.push(NeighborEdge { from: from.clone(), predicate, to: to.clone(), confidence });

                    let other = if from == *id { to } else { from };
                    if visited.insert(other.clone()) {
                        next_frontier.push(other);
                    }
                }
            }
            if next_frontier.is_empty() {
                break;
            }
            frontier = next_frontier;
        }

        edges.sort_by(|a, b| (a.from.as_str(), a.to.as_str()).cmp(&(b.from.as_str(), b.to.as_str())));
        edges.dedup();

        Ok(Neighborhood {
            concept_ids: visited.into_iter().collect(),
            edges,
        })
    }
}
