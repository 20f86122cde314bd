//! Co-occurrence pairs, relation candidates, and scored relations
//! (spec.md §3, §4.4, §4.5).

use super::concept::Concept;
use serde::{Deserialize, Serialize};

/// An unordered pair of distinct Concepts co-observed in the same Chunk.
///
/// Canonicalized so `a.id < b.id` lexicographically (spec.md §3 invariant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoOccurrence {
    pub a: Concept,
    pub b: Concept,
    pub window_id: String,
    pub freq: u32,
}

impl CoOccurrence {
    /// Build a co-occurrence, canonicalizing pair order by `conceptId`.
    pub fn new(one: Concept, other: Concept, window_id: impl Into<String>) -> Self {
        let (a, b) = if one.id <= other.id {
            (one, other)
        } else {
            (other, one)
        };
        Self {
            a,
            b,
            window_id: window_id.into(),
            freq: 1,
        }
    }
}

/// A CoOccurrence enriched with evidence text for LLM scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationCandidate {
    pub pair: CoOccurrence,
    pub evidence: String,
}

impl RelationCandidate {
    pub fn new(pair: CoOccurrence, evidence: impl Into<String>) -> Self {
        Self {
            pair,
            evidence: evidence.into(),
        }
    }
}

/// The LLM's judgment for a candidate (spec.md §3, §4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmVerdict {
    pub predicate: String,
    pub confidence: f64,
    pub evidence: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

impl LlmVerdict {
    /// Clamp confidence into `[0, 1]`.
    pub fn clamp_confidence(&mut self) {
        self.confidence = self.confidence.clamp(0.0, 1.0);
    }
}

/// A verdict with confidence >= threshold, joined to its original pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRelation {
    pub a: Concept,
    pub predicate: String,
    pub b: Concept,
    pub confidence: f64,
    pub evidence: String,
}
