//! Production `GraphSink`: a batched, retrying committer on top of
//! `neo4rs`'s async Bolt driver (spec.md §4.7) — the same crate and
//! session/transaction shape `ansonTGN-NexusRAG`'s ingest pipeline uses
//! for an identical Neo4j pairing.

use super::query_builder::command_to_query;
use super::GraphSink;
use crate::config::GraphConfig;
use crate::error::SinkError;
use crate::graph::GraphWrite;
use async_trait::async_trait;
use neo4rs::{query, Graph};
use std::time::Duration;
use tracing::{info, warn};

/// Build a driver config pinned to `graph.database` (spec.md §4.7, §6:
/// "Session is pinned to a named database").
fn connection_config(config: &GraphConfig) -> Result<neo4rs::Config, SinkError> {
    neo4rs::config()
        .uri(&config.uri)
        .user(&config.user)
        .password(&config.password)
        .db(config.database.as_str())
        .build()
        .map_err(|source| SinkError::Connect(source.to_string()))
}

pub struct Neo4jSink {
    graph: Option<Graph>,
    database: String,
    batch_size: usize,
    max_retries: u32,
    buffer: Vec<GraphWrite>,
}

impl Neo4jSink {
    /// Establish the driver, run `RETURN 1` as a smoke test (spec.md
    /// §4.7's lifecycle) — failure here is fatal.
    pub async fn open(config: &GraphConfig) -> Result<Self, SinkError> {
        let graph = Graph::connect(connection_config(config)?)
            .await
            .map_err(|source| SinkError::Connect(source.to_string()))?;

        graph
            .run(query("RETURN 1"))
            .await
            .map_err(|source| SinkError::Connect(source.to_string()))?;

        info!(database = %config.database, "graph sink opened");

        Ok(Self {
            graph: Some(graph),
            database: config.database.clone(),
            batch_size: config.batch_size,
            max_retries: config.max_retries,
            buffer: Vec::new(),
        })
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let graph = self
            .graph
            .as_ref()
            .ok_or_else(|| SinkError::Connect("sink already closed".to_string()))?;

        let mut last_err = None;
        for attempt in 1..=self.max_retries {
            match self.try_commit(graph).await {
                Ok(()) => {
                    self.buffer.clear();
                    return Ok(());
                }
                Err(err) => {
                    warn!(attempt, database = %self.database, error = %err, "flush attempt failed, retrying");
                    last_err = Some(err);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_secs(attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| SinkError::Connect("no commands to flush".to_string())))
    }

    /// Open one transaction, apply every buffered command, commit. On any
    /// failure, roll back so the whole batch can be retried (spec.md
    /// §4.7's transactional flush).
    async fn try_commit(&self, graph: &Graph) -> Result<(), SinkError> {
        let mut txn = graph.start_txn().await.map_err(SinkError::Commit)?;

        for command in &self.buffer {
            if let Err(source) = txn.run(command_to_query(command)).await {
                let _ = txn.rollback().await;
                return Err(SinkError::Commit(source));
            }
        }

        txn.commit().await.map_err(SinkError::Commit)
    }
}

#[async_trait]
impl GraphSink for Neo4jSink {
    async fn write(&mut self, command: GraphWrite) -> Result<(), SinkError> {
        self.buffer.push(command);
        if self.buffer.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        self.flush().await?;
        self.graph = None;
        Ok(())
    }
}
