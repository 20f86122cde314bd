//! Pair (S4): enumerate unordered concept pairs within a Chunk, with
//! evidence, for LLM scoring (spec.md §4.4).
//!
//! Shares S3's extraction result rather than recomputing it (spec.md
//! §9's recommendation), generalizing
//! `plexus::adapter::cooccurrence::CoOccurrenceAdapter`'s canonical-pair
//! enumeration from a graph snapshot to a per-chunk concept set.

use crate::graph::{Chunk, Concept, CoOccurrence, RelationCandidate};

/// Enumerate all unordered pairs among `concepts`, canonicalized by
/// `conceptId`, and attach each to the chunk's evidence window. Chunks
/// with fewer than two distinct concepts yield no candidates (spec.md
/// §4.4, §8: "a chunk with a single concept produces no candidates").
pub fn enumerate_candidates(chunk: &Chunk, concepts: &[Concept]) -> Vec<RelationCandidate> {
    if concepts.len() < 2 {
        return Vec::new();
    }

    let evidence = chunk.evidence();
    let mut candidates = Vec::with_capacity(concepts.len() * (concepts.len() - 1) / 2);

    for i in 0..concepts.len() {
        for j in (i + 1)..concepts.len() {
            let pair = CoOccurrence::new(
                concepts[i].clone(),
                concepts[j].clone(),
                chunk.chunk_id.clone(),
            );
            candidates.push(RelationCandidate::new(pair, evidence.clone()));
        }
    }

    candidates
}
