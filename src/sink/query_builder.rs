//! Translate a `GraphWrite` into a parameterized Cypher `Query` (spec.md
//! §4.7): MERGE by (label, id-property), SET every prop, and for edges
//! always SET `updatedAt` to the current wall-clock time.

use crate::graph::{canonical_relationship_type, id_property_for, GraphWrite, Props};
use neo4rs::{query, BoltType, Query};
use serde_json::Value;

pub fn command_to_query(command: &GraphWrite) -> Query {
    match command {
        GraphWrite::UpsertNode { label, id, props } => upsert_node_query(label, id, props),
        GraphWrite::UpsertEdge {
            from_label,
            from_id,
            rel,
            to_label,
            to_id,
            props,
        } => upsert_edge_query(from_label, from_id, rel, to_label, to_id, props),
    }
}

fn upsert_node_query(label: &str, id: &str, props: &Props) -> Query {
    let id_prop = id_property_for(label);
    let set_clause = set_clause("n", props.keys());
    let cypher = if set_clause.is_empty() {
        format!("MERGE (n:{label} {{{id_prop}: $id}})")
    } else {
        format!("MERGE (n:{label} {{{id_prop}: $id}}) SET {set_clause}")
    };

    bind_props(query(&cypher).param("id", id.to_string()), props)
}

fn upsert_edge_query(
    from_label: &str,
    from_id: &str,
    rel: &str,
    to_label: &str,
    to_id: &str,
    props: &Props,
) -> Query {
    let from_id_prop = id_property_for(from_label);
    let to_id_prop = id_property_for(to_label);
    let rel = canonical_relationship_type(rel);

    let mut set_fields = vec!["r.updatedAt = datetime()".to_string()];
    set_fields.extend(props.keys().map(|k| format!("r.{k} = ${k}")));

    let cypher = format!(
        "MERGE (a:{from_label} {{{from_id_prop}: $from_id}}) \
         MERGE (b:{to_label} {{{to_id_prop}: $to_id}}) \
         MERGE (a)-[r:{rel}]->(b) \
         SET {}",
        set_fields.join(", ")
    );

    bind_props(
        query(&cypher)
            .param("from_id", from_id.to_string())
            .param("to_id", to_id.to_string()),
        props,
    )
}

fn set_clause<'a>(var: &str, keys: impl Iterator<Item = &'a String>) -> String {
    keys.map(|k| format!("{var}.{k} = ${k}")).collect::<Vec<_>>().join(", ")
}

fn bind_props(mut q: Query, props: &Props) -> Query {
    for (key, value) in props {
        q = q.param(key.as_str(), json_to_bolt(value));
    }
    q
}

/// Convert a JSON property value into the Bolt type neo4rs needs for
/// parameter binding. Properties on this crate's nodes/edges are always
/// strings, numbers, or booleans (spec.md §4.6) — nested objects never
/// appear.
fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::String(s) => s.clone().into(),
        Value::Bool(b) => (*b).into(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into()
            } else {
                n.as_f64().unwrap_or(0.0).into()
            }
        }
        _ => String::new().into(),
    }
}
