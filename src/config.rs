//! Layered configuration (spec.md §6): a TOML file overlaid with
//! environment variables. Environment overrides are required for the
//! graph connection endpoint and password — credentials must never live
//! only in a file.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_graph_database() -> String {
    "neo4j".to_string()
}

fn default_batch_size() -> usize {
    500
}

fn default_retries() -> u32 {
    3
}

fn default_llm_model() -> String {
    "llama3".to_string()
}

fn default_temperature() -> f64 {
    0.0
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_predicate_set() -> Vec<String> {
    vec![
        "related_to".to_string(),
        "is_a".to_string(),
        "part_of".to_string(),
        "uses".to_string(),
        "causes".to_string(),
    ]
}

fn default_min_confidence() -> f64 {
    0.6
}

fn default_parallelism() -> usize {
    4
}

/// `graph.*` (spec.md §6): connection and batching options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_graph_database")]
    pub database: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// `llm.*` (spec.md §6): the scorer/client options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    pub endpoint: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// `llm.timeout`, a duration in whole seconds.
    #[serde(default = "default_timeout_secs", rename = "timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `relation.cooccur.*` (spec.md §6). Reserved/unapplied per §9 — see
/// DESIGN.md for the recorded decision on the open PMI question.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CoOccurConfig {
    #[serde(default)]
    pub window: Option<u32>,
    #[serde(default)]
    pub min_pmi: Option<f64>,
}

/// `relation.llm.*` (spec.md §6): scoring policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationLlmConfig {
    #[serde(default = "default_predicate_set")]
    pub predicate_set: Vec<String>,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

impl Default for RelationLlmConfig {
    fn default() -> Self {
        Self {
            predicate_set: default_predicate_set(),
            min_confidence: default_min_confidence(),
        }
    }
}

impl RelationLlmConfig {
    pub fn is_allowed_predicate(&self, predicate: &str) -> bool {
        self.predicate_set.iter().any(|p| p == predicate)
    }
}

/// `relation.*` (spec.md §6).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RelationConfig {
    #[serde(default)]
    pub cooccur: CoOccurConfig,
    #[serde(default)]
    pub llm: RelationLlmConfig,
}

/// Top-level configuration, loaded once at stage initialization (spec.md
/// §5: "no mutable singletons" — `Config` is an owned value passed to
/// each stage constructor).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub graph: GraphConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub relation: RelationConfig,
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

impl Config {
    /// Load configuration from a TOML file at `path`, then overlay
    /// environment overrides. Matches `plexus`'s CLI-driven config
    /// loading shape, generalized to the spec's ~14 named options.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay required environment overrides (spec.md §6: "Environment
    /// overrides for connection endpoint and password are required").
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(uri) = std::env::var("SEMGRAPH_GRAPH_URI") {
            self.graph.uri = uri;
        }
        if let Ok(password) = std::env::var("SEMGRAPH_GRAPH_PASSWORD") {
            self.graph.password = password;
        }
        if let Ok(endpoint) = std::env::var("SEMGRAPH_LLM_ENDPOINT") {
            self.llm.endpoint = endpoint;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.uri.is_empty() {
            return Err(ConfigError::Missing("graph.uri"));
        }
        if self.graph.password.is_empty() {
            return Err(ConfigError::Missing("graph.password"));
        }
        if self.graph.batch_size == 0 {
            return Err(ConfigError::Invalid {
                field: "graph.batchSize",
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.graph.max_retries == 0 {
            return Err(ConfigError::Invalid {
                field: "graph.maxRetries",
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.llm.max_retries == 0 {
            return Err(ConfigError::Invalid {
                field: "llm.maxRetries",
                reason: "must be >= 1".to_string(),
            });
        }
        if self.llm.endpoint.is_empty() {
            return Err(ConfigError::Missing("llm.endpoint"));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::Invalid {
                field: "parallelism",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Load a `.env` file (if present) before reading process environment
/// variables, grounded in `ansonTGN-NexusRAG`'s `dotenvy` usage.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
