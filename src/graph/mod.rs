//! Core data model: chunks, concepts, mentions, relation candidates, and
//! the graph-write commands the sink consumes.

mod chunk;
mod concept;
mod relation;
mod write;

pub use chunk::{Chunk, Span};
pub use concept::{concept_id, normalize_lemma, Concept, Origin};
pub use relation::{CoOccurrence, LlmVerdict, RelationCandidate, ScoredRelation};
pub use write::{canonical_relationship_type, id_property_for, GraphWrite, Props};
