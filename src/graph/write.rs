//! GraphWrite — the sink's input command (spec.md §3, §9).
//!
//! A tagged sum with exactly two cases, matched once at the point of use
//! in the sink. No virtual hierarchy — see spec.md §9 design notes.

use serde_json::Value;
use std::collections::BTreeMap;

/// Property bag attached to a node or edge upsert. `BTreeMap` keeps
/// iteration order deterministic for logging and tests.
pub type Props = BTreeMap<String, Value>;

/// A command the sink applies transactionally, batched with others.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphWrite {
    /// MERGE a node by (label, id-property), SET every field in `props`.
    UpsertNode {
        label: &'static str,
        id: String,
        props: Props,
    },
    /// MERGE both endpoints, MERGE the relationship between them, SET
    /// every field in `props` plus `updatedAt`.
    UpsertEdge {
        from_label: &'static str,
        from_id: String,
        rel: String,
        to_label: &'static str,
        to_id: String,
        props: Props,
    },
}

impl GraphWrite {
    pub fn upsert_node(label: &'static str, id: impl Into<String>, props: Props) -> Self {
        GraphWrite::UpsertNode {
            label,
            id: id.into(),
            props,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn upsert_edge(
        from_label: &'static str,
        from_id: impl Into<String>,
        rel: impl Into<String>,
        to_label: &'static str,
        to_id: impl Into<String>,
        props: Props,
    ) -> Self {
        GraphWrite::UpsertEdge {
            from_label,
            from_id: from_id.into(),
            rel: rel.into(),
            to_label,
            to_id: to_id.into(),
            props,
        }
    }
}

/// The id-property name for a given node label (spec.md §4.7): `chunkId`
/// for `Chunk`, `conceptId` for `Concept`, else `id`.
pub fn id_property_for(label: &str) -> &'static str {
    match label {
        "Chunk" => "chunkId",
        "Concept" => "conceptId",
        _ => "id",
    }
}

/// Uppercase a relationship type and replace non-`[A-Z0-9_]` chars with
/// `_`, per spec.md §4.6/§4.7.
pub fn canonical_relationship_type(rel: &str) -> String {
    rel.chars()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if upper.is_ascii_alphanumeric() || upper == '_' {
                upper
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_property_matches_label() {
        assert_eq!(id_property_for("Chunk"), "chunkId");
        assert_eq!(id_property_for("Concept"), "conceptId");
        assert_eq!(id_property_for("Anything"), "id");
    }

    #[test]
    fn canonical_relationship_type_uppercases_and_replaces() {
        assert_eq!(canonical_relationship_type("is_a"), "IS_A");
        assert_eq!(canonical_relationship_type("works-at"), "WORKS_AT");
        assert_eq!(canonical_relationship_type("part of"), "PART_OF");
    }
}
