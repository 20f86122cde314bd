//! Test double: applies MERGE-equivalent semantics in memory so sink
//! idempotence can be asserted without a live database, patterned on
//! `plexus::adapter::engine_sink::EngineSink`'s in-memory mutation style.

use super::GraphSink;
use crate::error::SinkError;
use crate::graph::{canonical_relationship_type, GraphWrite, Props};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Key identifying a node by (label, id).
type NodeKey = (&'static str, String);
/// Key identifying an edge by (fromLabel, fromId, rel, toLabel, toId).
type EdgeKey = (&'static str, String, String, &'static str, String);

#[derive(Debug, Default)]
pub struct InMemorySink {
    batch_size: usize,
    buffer: Vec<GraphWrite>,
    pub nodes: BTreeMap<NodeKey, Props>,
    pub edges: BTreeMap<EdgeKey, Props>,
    pub flush_count: usize,
}

impl InMemorySink {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Default::default()
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        for command in self.buffer.drain(..) {
            match command {
                GraphWrite::UpsertNode { label, id, props } => {
                    self.nodes
                        .entry((label, id))
                        .or_default()
                        .extend(props);
                }
                GraphWrite::UpsertEdge {
                    from_label,
                    from_id,
                    rel,
                    to_label,
                    to_id,
                    props,
                } => {
                    let rel = canonical_relationship_type(&rel);
                    self.nodes.entry((from_label, from_id.clone())).or_default();
                    self.nodes.entry((to_label, to_id.clone())).or_default();
                    self.edges
                        .entry((from_label, from_id, rel, to_label, to_id))
                        .or_default()
                        .extend(props);
                }
            }
        }
        self.flush_count += 1;
    }
}

#[async_trait]
impl GraphSink for InMemorySink {
    async fn write(&mut self, command: GraphWrite) -> Result<(), SinkError> {
        self.buffer.push(command);
        if self.buffer.len() >= self.batch_size.max(1) {
            self.flush();
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        self.flush();
        Ok(())
    }
}
