//! Shared helpers for semgraph's integration tests: sample input lines
//! and small config builders so each test file isn't rebuilding the same
//! fixtures.

use semgraph::config::{GraphConfig, LlmConfig, RelationLlmConfig};

pub fn sample_line(chunk_id: &str, text: &str) -> String {
    format!(
        r#"{{"chunkId":"{chunk_id}","docId":"d1","span":{{"start":0,"end":{len}}},"text":"{text}","sourceUri":"s","hash":"h"}}"#,
        chunk_id = chunk_id,
        text = text,
        len = text.len(),
    )
}

pub fn graph_config() -> GraphConfig {
    GraphConfig {
        uri: "bolt://localhost:7687".to_string(),
        user: "neo4j".to_string(),
        password: "test".to_string(),
        database: "neo4j".to_string(),
        batch_size: 50,
        max_retries: 3,
    }
}

pub fn llm_config(endpoint: &str) -> LlmConfig {
    LlmConfig {
        endpoint: endpoint.to_string(),
        model: "llama3".to_string(),
        temperature: 0.0,
        timeout_secs: 5,
        max_retries: 2,
    }
}

pub fn relation_config() -> RelationLlmConfig {
    RelationLlmConfig {
        predicate_set: vec![
            "related_to".to_string(),
            "is_a".to_string(),
            "part_of".to_string(),
            "uses".to_string(),
        ],
        min_confidence: 0.6,
    }
}
