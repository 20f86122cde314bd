//! Chunk — an immutable unit of ingest (spec.md §3).

use serde::{Deserialize, Serialize};

/// A byte or character offset span into the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

/// An immutable unit of ingest, created by S2 from a raw record.
///
/// Never mutated after construction. Two `Chunk`s are equal iff every
/// field matches — `chunkId` is assumed unique by the upstream source but
/// is not itself re-derived from content the way `Concept::id` is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub doc_id: String,
    pub span: Span,
    pub text: String,
    pub source_uri: String,
    pub hash: String,
}

impl Chunk {
    pub fn new(
        chunk_id: impl Into<String>,
        doc_id: impl Into<String>,
        span: Span,
        text: impl Into<String>,
        source_uri: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            doc_id: doc_id.into(),
            span,
            text: text.into(),
            source_uri: source_uri.into(),
            hash: hash.into(),
        }
    }

    /// First 500 characters of the chunk's text, the evidence window used
    /// by S4/S5 (spec.md §3, §4.4).
    pub fn evidence(&self) -> String {
        self.text.chars().take(500).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Chunk {
        Chunk::new(
            "c1",
            "d1",
            Span { start: 0, end: 9 },
            "Neo4j is great",
            "s",
            "h",
        )
    }

    #[test]
    fn round_trip_through_json_preserves_chunk() {
        let chunk = sample();
        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(chunk, back);
    }

    #[test]
    fn evidence_truncates_to_500_chars() {
        let long_text = "a".repeat(600);
        let chunk = Chunk::new("c", "d", Span { start: 0, end: 0 }, long_text, "s", "h");
        assert_eq!(chunk.evidence().chars().count(), 500);
    }

    #[test]
    fn evidence_shorter_than_500_is_unchanged() {
        let chunk = sample();
        assert_eq!(chunk.evidence(), chunk.text);
    }
}
