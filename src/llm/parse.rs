//! Two-strategy verdict parsing (spec.md §4.5): strict JSON extraction of
//! the first `{...}` substring, then a lenient regex fallback with
//! per-field defaults for text that isn't valid JSON at all.

use crate::graph::{LlmVerdict, RelationCandidate};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Deserialize)]
struct RawVerdict {
    predicate: String,
    confidence: f64,
    #[serde(default)]
    evidence: String,
    #[serde(default, rename = "ref")]
    reference: Option<String>,
}

/// Parse a model's raw completion into an `LlmVerdict` tied to `candidate`,
/// collapsing any predicate outside `predicate_set` to `related_to`
/// (spec.md §4.5: both parsing strategies apply this collapse).
pub fn parse_verdict(raw_text: &str, candidate: &RelationCandidate, predicate_set: &[String]) -> LlmVerdict {
    let raw = strict_json(raw_text).unwrap_or_else(|| lenient_regex(raw_text, candidate));

    let predicate = if predicate_set.iter().any(|p| p == &raw.predicate) {
        raw.predicate
    } else {
        "related_to".to_string()
    };
    let reference = raw.reference.unwrap_or_else(|| {
        format!("{}_{}_{}", candidate.pair.a.lemma, predicate, candidate.pair.b.lemma)
    });

    let mut verdict = LlmVerdict {
        predicate,
        confidence: raw.confidence,
        evidence: raw.evidence,
        reference,
    };
    verdict.clamp_confidence();
    verdict
}

/// Strategy 1: extract the first `{...}` substring and strict-decode it.
fn strict_json(text: &str) -> Option<RawVerdict> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Strategy 2: regex-extract `predicate:`/`confidence:`/`evidence:"..."`,
/// case-insensitive for the first two (spec.md §4.5). Missing fields take
/// their spec-mandated defaults — this strategy never fails outright.
fn lenient_regex(text: &str, candidate: &RelationCandidate) -> RawVerdict {
    let predicate = predicate_re()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_else(|| "related_to".to_string());

    let confidence = confidence_re()
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.5);

    let evidence = evidence_re()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| candidate.evidence.chars().take(100).collect());

    RawVerdict {
        predicate,
        confidence,
        evidence,
        reference: None,
    }
}

fn predicate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)predicate:\s*([a-z_]+)").unwrap())
}

fn confidence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)confidence:\s*([0-9.]+)").unwrap())
}

fn evidence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"evidence:\s*"([^"]+)""#).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Concept, CoOccurrence, Origin};

    fn predicate_set() -> Vec<String> {
        vec!["uses".to_string(), "is_a".to_string(), "related_to".to_string()]
    }

    fn candidate() -> RelationCandidate {
        let a = Concept::from_surface("neo4j", Origin::CamelCase);
        let b = Concept::from_surface("graph", Origin::pos("NN"));
        let pair = CoOccurrence::new(a, b, "c1");
        RelationCandidate::new(pair, "evidence text for this candidate")
    }

    #[test]
    fn parses_strict_json_response() {
        let raw = r#"{"predicate": "uses", "confidence": 0.9, "evidence": "stores graphs", "ref": "neo4j_uses_graph"}"#;
        let verdict = parse_verdict(raw, &candidate(), &predicate_set());
        assert_eq!(verdict.predicate, "uses");
        assert_eq!(verdict.confidence, 0.9);
        assert_eq!(verdict.evidence, "stores graphs");
        assert_eq!(verdict.reference, "neo4j_uses_graph");
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let raw = "Sure, here is my answer: {\"predicate\": \"is_a\", \"confidence\": 0.5, \"evidence\": \"x\"} Let me know if you need more.";
        let verdict = parse_verdict(raw, &candidate(), &predicate_set());
        assert_eq!(verdict.predicate, "is_a");
    }

    #[test]
    fn falls_back_to_lenient_regex_on_malformed_json() {
        let raw = "predicate: related_to, confidence: 0.72, evidence: \"co-located\"";
        let verdict = parse_verdict(raw, &candidate(), &predicate_set());
        assert_eq!(verdict.predicate, "related_to");
        assert_eq!(verdict.confidence, 0.72);
        assert_eq!(verdict.evidence, "co-located");
    }

    #[test]
    fn unparseable_text_falls_back_to_spec_mandated_defaults() {
        let raw = "I'm not sure how these relate.";
        let verdict = parse_verdict(raw, &candidate(), &predicate_set());
        assert_eq!(verdict.predicate, "related_to");
        assert_eq!(verdict.confidence, 0.5);
        assert_eq!(verdict.evidence, "evidence text for this candidate");
    }

    #[test]
    fn confidence_above_one_is_clamped() {
        let raw = r#"{"predicate": "uses", "confidence": 1.4, "evidence": "x"}"#;
        let verdict = parse_verdict(raw, &candidate(), &predicate_set());
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn unknown_predicate_collapses_to_related_to() {
        let raw = r#"{"predicate": "orbits", "confidence": 0.9, "evidence": "x"}"#;
        let verdict = parse_verdict(raw, &candidate(), &predicate_set());
        assert_eq!(verdict.predicate, "related_to");
    }

    #[test]
    fn reference_defaults_to_lemma_predicate_lemma_when_absent() {
        let raw = r#"{"predicate": "uses", "confidence": 0.8, "evidence": "x"}"#;
        let verdict = parse_verdict(raw, &candidate(), &predicate_set());
        assert_eq!(verdict.reference, "neo4j_uses_graph");
    }
}
