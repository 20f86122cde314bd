//! Sink (S7): durably commit a stream of GraphWrite commands to a
//! property-graph database (spec.md §4.7).
//!
//! `GraphSink` generalizes `plexus::storage::GraphStore`'s
//! trait-at-the-seam style onto an async, batched interface: `Neo4jSink`
//! (production, `neo4rs`) and `InMemorySink` (test double, patterned on
//! `plexus::adapter::engine_sink::EngineSink`'s in-memory state mutation).

mod memory;
mod neo4j;
mod query_builder;

pub use memory::InMemorySink;
pub use neo4j::Neo4jSink;

use crate::error::SinkError;
use crate::graph::GraphWrite;
use async_trait::async_trait;

/// A destination for graph-write commands, batched and flushed with
/// retry (spec.md §4.7). Each worker owns its own sink instance; sinks
/// share no buffer (spec.md §5).
#[async_trait]
pub trait GraphSink: Send + Sync {
    /// Buffer `command`, flushing if the batch is now full.
    async fn write(&mut self, command: GraphWrite) -> Result<(), SinkError>;

    /// Flush any residual buffered commands, then tear down the
    /// connection. Idempotent: calling `close` on an already-closed sink
    /// is a no-op.
    async fn close(&mut self) -> Result<(), SinkError>;
}
