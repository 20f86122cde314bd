//! semgraph: concept extraction and LLM-scored relation graph pipeline.
//!
//! Ingests text chunks, extracts named concepts, discovers candidate
//! semantic relations between co-occurring concepts, scores the candidates
//! with an external LLM, and persists nodes and edges to a property graph.
//!
//! # Pipeline
//!
//! `source` (S1) -> `parse` (S2) -> `extract` (S3) -> `pair` (S4) ->
//! `score` (S5, via `llm` / S8) -> `materialize` (S6) -> `sink` (S7).
//! `query` (S9) is a read-only projection over the populated graph, served
//! by the `http` module.

pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod http;
pub mod llm;
pub mod materialize;
pub mod pair;
pub mod pipeline;
pub mod query;
pub mod score;
pub mod sink;

pub use config::Config;
pub use error::SemgraphError;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
