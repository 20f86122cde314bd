//! `GraphReader` over `InMemorySink`'s committed maps — no network
//! round-trip, used by tests and by `InMemorySink`-backed demo runs.

use super::{ConceptRecord, EvidenceEntry, GraphReader, NeighborEdge, Neighborhood};
use crate::error::QueryError;
use crate::sink::InMemorySink;
use async_trait::async_trait;
use std::collections::{BTreeSet, VecDeque};

fn concept_props<'a>(
    sink: &'a InMemorySink,
    id: &str,
) -> Option<(&'a str, &'a crate::graph::Props)> {
    sink.nodes
        .iter()
        .find(|((label, node_id), _)| *label == "Concept" && node_id == id)
        .map(|((label, _), props)| (*label, props))
}

fn find_concept_id(sink: &InMemorySink, lemma_or_id: &str) -> Option<String> {
    if let Some(((_, id), _)) = sink
        .nodes
        .iter()
        .find(|((label, node_id), _)| *label == "Concept" && node_id == lemma_or_id)
    {
        return Some(id.clone());
    }
    sink.nodes
        .iter()
        .find(|((label, _), props)| {
            *label == "Concept" && props.get("lemma").and_then(|v| v.as_str()) == Some(lemma_or_id)
        })
        .map(|((_, id), _)| id.clone())
}

#[async_trait]
impl GraphReader for InMemorySink {
    async fn find_concept(&self, lemma_or_id: &str) -> Result<Option<ConceptRecord>, QueryError> {
        let Some(id) = find_concept_id(self, lemma_or_id) else {
            return Ok(None);
        };
        let Some((_, props)) = concept_props(self, &id) else {
            return Ok(None);
        };

        let mention_count = self
            .edges
            .keys()
            .filter(|(from_label, _, rel, to_label, to_id)| {
                *from_label == "Chunk" && rel == "MENTIONS" && *to_label == "Concept" && to_id == &id
            })
            .count() as u64;

        Ok(Some(ConceptRecord {
            id: id.clone(),
            lemma: props.get("lemma").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
            surface: props.get("surface").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
            origin: props.get("origin").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
            mention_count,
        }))
    }

    async fn evidence_trail(&self, concept_id: &str) -> Result<Vec<EvidenceEntry>, QueryError> {
        let mut entries = Vec::new();
        for (from_label, from_id, rel, to_label, to_id) in self.edges.keys() {
            if from_label != &"Chunk" || rel != "MENTIONS" || to_label != &"Concept" || to_id != concept_id {
                continue;
            }
            let Some(chunk_props) = self.nodes.get(&("Chunk", from_id.clone())) else {
                continue;
            };
            entries.push(EvidenceEntry {
                chunk_id: from_id.clone(),
                doc_id: chunk_props.get("docId").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
                source_uri: chunk_props.get("sourceUri").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
                text: chunk_props.get("text").and_then(|v| v.as_str()).unwrap_or_default().to_string(),
            });
        }
        Ok(entries)
    }

    async fn neighborhood(
        &self,
        concept_id: &str,
        depth: u32,
        min_confidence: f64,
    ) -> Result<Neighborhood, QueryError> {
        let mut visited: BTreeSet<String> = BTreeSet::new();
        visited.insert(concept_id.to_string());
        let mut frontier = VecDeque::new();
        frontier.push_back((concept_id.to_string(), 0u32));
        let mut edges = Vec::new();

        while let Some((current, hops)) = frontier.pop_front() {
            if hops >= depth {
                continue;
            }
            for ((from_label, from_id, rel, to_label, to_id), props) in &self.edges {
                if *from_label != "Concept" || *to_label != "Concept" {
                    continue;
                }
                let confidence = props.get("confidence").and_then(|v| v.as_f64()).unwrap_or(0.0);
                if confidence < min_confidence {
                    continue;
                }
                let other = if from_id == &current {
                    Some(to_id.clone())
                } else if to_id == &current {
                    Some(from_id.clone())
                } else {
                    None
                };
                let Some(other) = other else { continue };

                edges.push(NeighborEdge {
                    from: from_id.clone(),
                    predicate: rel.clone(),
                    to: to_id.clone(),
                    confidence,
                });

                if visited.insert(other.clone()) {
                    frontier.push_back((other, hops + 1));
                }
            }
        }

        edges.sort_by(|a, b| (a.from.as_str(), a.to.as_str()).cmp(&(b.from.as_str(), b.to.as_str())));
        edges.dedup();

        Ok(Neighborhood {
            concept_ids: visited.into_iter().collect(),
            edges,
        })
    }
}
