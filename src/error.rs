//! Per-subsystem error taxonomy (spec.md §7), mirroring `plexus`'s
//! `StorageError`/`AdapterError` split: one `thiserror`-derived enum per
//! subsystem, plus a crate-level enum the binary matches on to pick an
//! exit code.

use thiserror::Error;

/// S2 parse failures. Per spec.md §4.2/§7, these are logged and the
/// offending record is dropped — never propagated as a pipeline failure.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// S3 extraction failures. Per spec.md §4.3/§7, an `ExtractionError` on
/// the NER path triggers fallback to the heuristic path for that chunk;
/// it is never surfaced as a pipeline failure.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("NER pass failed: {0}")]
    NerFailed(String),
}

/// S5/S8 errors (spec.md §4.5/§7). Retried with linear backoff; on
/// exhaustion the candidate is dropped, which is not a pipeline failure.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("response parse error: {0}")]
    ResponseParse(String),
}

/// S7 sink errors (spec.md §4.7/§7).
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("commit failed: {0}")]
    Commit(#[from] neo4rs::Error),
    #[error("failed to connect to graph database: {0}")]
    Connect(String),
}

/// S9 query surface errors (spec.md §7): distinguishes missing-id lookups
/// from a generic internal category and never leaks a raw backend error
/// in the primary message.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Missing or invalid required configuration (spec.md §6/§7). Fatal —
/// no stage starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration value: {0}")]
    Missing(&'static str),
    #[error("invalid configuration value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Crate-level error the binary matches on to choose a process exit code
/// (spec.md §7: "the pipeline process exits non-zero on fatal errors").
#[derive(Debug, Error)]
pub enum SemgraphError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SemgraphError {
    /// Exit code the CLI reports for this error (spec.md §7).
    pub fn exit_code(&self) -> i32 {
        match self {
            SemgraphError::Config(_) => 2,
            SemgraphError::Sink(_) => 3,
            SemgraphError::Query(_) => 4,
            SemgraphError::Io(_) => 1,
        }
    }
}
