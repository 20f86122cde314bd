//! Score (S5): turn each RelationCandidate into a ScoredRelation by
//! calling the LLM client, retrying transport failures with linear
//! backoff, and filtering by confidence (spec.md §4.5).
//!
//! Bounded concurrency is the caller's responsibility (spec.md §5): this
//! module scores one candidate per call so the pipeline orchestrator can
//! gate calls behind a `tokio::sync::Semaphore`, mirroring
//! `plexus::analysis::orchestrator::AnalysisOrchestrator`'s
//! semaphore-rate-limited LLM-analyzer phase.

use crate::config::{LlmConfig, RelationLlmConfig};
use crate::error::LlmError;
use crate::graph::{RelationCandidate, ScoredRelation};
use crate::llm::{build_prompt, parse_verdict, LlmClient};
use tracing::warn;

/// Score a single candidate, retrying transport/HTTP/response-parse
/// failures with linear backoff (`1s * attempt_number`, up to
/// `llm.maxRetries` total attempts). Returns `None` if every attempt
/// fails, or if the parsed verdict's confidence falls below
/// `relation.llm.minConfidence` — both are non-fatal, per spec.md §7.
pub async fn score_candidate(
    client: &dyn LlmClient,
    candidate: RelationCandidate,
    llm_config: &LlmConfig,
    relation_config: &RelationLlmConfig,
) -> Option<ScoredRelation> {
    let prompt = build_prompt(&candidate, &relation_config.predicate_set);

    let mut last_err: Option<LlmError> = None;
    for attempt in 1..=llm_config.max_retries {
        match client.generate(&prompt).await {
            Ok(raw) => {
                let verdict = parse_verdict(&raw, &candidate, &relation_config.predicate_set);
                if verdict.confidence < relation_config.min_confidence {
                    return None;
                }
                return Some(ScoredRelation {
                    a: candidate.pair.a,
                    predicate: verdict.predicate,
                    b: candidate.pair.b,
                    confidence: verdict.confidence,
                    evidence: verdict.evidence,
                });
            }
            Err(err) => last_err = Some(err),
        }

        if attempt < llm_config.max_retries {
            tokio::time::sleep(std::time::Duration::from_secs(attempt as u64)).await;
        }
    }

    warn!(
        error = ?last_err,
        attempts = llm_config.max_retries,
        "dropping candidate after exhausting LLM retries"
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Concept, CoOccurrence, Origin};
    use crate::llm::MockLlmClient;

    fn llm_config() -> LlmConfig {
        LlmConfig {
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            temperature: 0.0,
            timeout_secs: 5,
            max_retries: 3,
        }
    }

    fn relation_config() -> RelationLlmConfig {
        RelationLlmConfig {
            predicate_set: vec!["uses".to_string(), "related_to".to_string()],
            min_confidence: 0.6,
        }
    }

    fn candidate() -> RelationCandidate {
        let a = Concept::from_surface("neo4j", Origin::CamelCase);
        let b = Concept::from_surface("graph", Origin::pos("NN"));
        let pair = CoOccurrence::new(a, b, "c1");
        RelationCandidate::new(pair, "Neo4j stores graphs efficiently.")
    }

    #[tokio::test]
    async fn scores_candidate_above_threshold() {
        let client = MockLlmClient::available()
            .with_response(r#"{"predicate": "uses", "confidence": 0.9, "evidence": "stores"}"#);
        let scored = score_candidate(&client, candidate(), &llm_config(), &relation_config())
            .await
            .unwrap();
        assert_eq!(scored.predicate, "uses");
        assert_eq!(scored.confidence, 0.9);
    }

    #[tokio::test]
    async fn confidence_equal_to_threshold_is_kept() {
        let client = MockLlmClient::available()
            .with_response(r#"{"predicate": "uses", "confidence": 0.6, "evidence": "x"}"#);
        let scored = score_candidate(&client, candidate(), &llm_config(), &relation_config()).await;
        assert!(scored.is_some());
    }

    #[tokio::test]
    async fn drops_candidate_below_confidence_threshold() {
        let client = MockLlmClient::available()
            .with_response(r#"{"predicate": "uses", "confidence": 0.2, "evidence": "x"}"#);
        let scored = score_candidate(&client, candidate(), &llm_config(), &relation_config()).await;
        assert!(scored.is_none());
    }

    #[tokio::test]
    async fn unrecognized_predicate_collapses_to_related_to() {
        let client = MockLlmClient::available()
            .with_response(r#"{"predicate": "orbits", "confidence": 0.9, "evidence": "x"}"#);
        let scored = score_candidate(&client, candidate(), &llm_config(), &relation_config())
            .await
            .unwrap();
        assert_eq!(scored.predicate, "related_to");
    }

    #[tokio::test]
    async fn retries_transport_failure_then_succeeds() {
        let client = MockLlmClient::available()
            .with_failure(LlmError::ResponseParse("transient".to_string()))
            .with_response(r#"{"predicate": "uses", "confidence": 0.8, "evidence": "x"}"#);
        let scored = score_candidate(&client, candidate(), &llm_config(), &relation_config())
            .await
            .unwrap();
        assert_eq!(scored.predicate, "uses");
    }

    #[tokio::test]
    async fn drops_candidate_after_exhausting_retries() {
        let client = MockLlmClient::available();
        let scored = score_candidate(&client, candidate(), &llm_config(), &relation_config()).await;
        assert!(scored.is_none());
    }
}
