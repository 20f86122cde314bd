//! The LLM client trait and its two implementations (spec.md §4.5, §6):
//! `OllamaClient` (production, `reqwest`) and `MockLlmClient` (test,
//! preconfigured responses) — the same trait/production/mock split as
//! `plexus::llm_orc::{LlmOrcClient, SubprocessClient, MockClient}`, over
//! HTTP instead of an MCP subprocess.

use crate::config::LlmConfig;
use crate::error::LlmError;
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Abstracts over how a raw completion is obtained, so the scorer (S5)
/// never depends on the wire protocol.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send `prompt`, return the model's raw completion text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Preflight availability check (spec.md §6: `GET <endpoint>/api/tags`).
    async fn is_available(&self) -> bool;
}

/// Production client: an Ollama-compatible `/api/generate` endpoint.
pub struct OllamaClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f64,
    timeout: std::time::Duration,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: config.timeout(),
        }
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": { "temperature": self.temperature },
        });

        let response = self
            .http
            .post(format!("{}/api/generate", self.endpoint))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|source| {
                if source.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Transport(source)
                }
            })?;

        if !response.status().is_success() {
            return Err(LlmError::ResponseParse(format!(
                "endpoint returned HTTP {}",
                response.status()
            )));
        }

        let value: serde_json::Value = response.json().await.map_err(LlmError::Transport)?;
        value
            .get("response")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| LlmError::ResponseParse("missing \"response\" field".to_string()))
    }

    async fn is_available(&self) -> bool {
        let probe = self
            .http
            .get(format!("{}/api/tags", self.endpoint))
            .timeout(std::time::Duration::from_secs(5))
            .send()
            .await;
        matches!(probe, Ok(resp) if resp.status().is_success())
    }
}

/// Test double: replays a preconfigured queue of responses in call order,
/// the shape of `plexus::llm_orc::MockClient` generalized from a
/// name-keyed map (llm-orc invokes ensembles by name) to an ordered queue
/// (the scorer calls `generate` once per candidate, with no natural key).
pub struct MockLlmClient {
    available: bool,
    queue: Mutex<VecDeque<Result<String, LlmError>>>,
}

impl MockLlmClient {
    pub fn available() -> Self {
        Self {
            available: true,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a successful completion to return on the next `generate` call.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.queue.lock().unwrap().push_back(Ok(response.into()));
        self
    }

    /// Queue a failure to return on the next `generate` call.
    pub fn with_failure(self, error: LlmError) -> Self {
        self.queue.lock().unwrap().push_back(Err(error));
        self
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        if !self.available {
            return Err(LlmError::ResponseParse(
                "mock client configured as unavailable".to_string(),
            ));
        }
        let mut queue = self.queue.lock().unwrap();
        queue
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::ResponseParse("mock queue exhausted".to_string())))
    }

    async fn is_available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_replays_queued_responses_in_order() {
        let client = MockLlmClient::available()
            .with_response("first")
            .with_response("second");
        assert_eq!(client.generate("p").await.unwrap(), "first");
        assert_eq!(client.generate("p").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn mock_unavailable_reports_false() {
        let client = MockLlmClient::unavailable();
        assert!(!client.is_available().await);
    }

    #[tokio::test]
    async fn mock_exhausted_queue_errors() {
        let client = MockLlmClient::available();
        assert!(client.generate("p").await.is_err());
    }

    #[tokio::test]
    async fn mock_can_queue_a_failure() {
        let client = MockLlmClient::available()
            .with_failure(LlmError::ResponseParse("boom".to_string()));
        assert!(client.generate("p").await.is_err());
    }
}
