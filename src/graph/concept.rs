//! Concept — a canonical entity extracted from a Chunk (spec.md §3, §4.3).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Extraction method tag, drawn from the closed set spec.md §3 defines:
/// `NER_<TYPE>` for NER types, `POS_<TAG>` for part-of-speech noun tags,
/// `camelCase`, `acronym`, `technicalTerm`.
///
/// Serializes/deserializes as the plain tag string (e.g. `"NER_PERSON"`),
/// matching the origin values spec.md describes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Ner(String),
    Pos(String),
    /// The heuristic path's capitalized-word/sequence rule (spec.md
    /// §4.3): renders as the literal tag `NER`, distinct from the typed
    /// `NER_<TYPE>` family the NER path itself produces.
    Heuristic,
    CamelCase,
    Acronym,
    TechnicalTerm,
}

impl Origin {
    pub fn ner(tag: impl Into<String>) -> Self {
        Origin::Ner(tag.into())
    }

    pub fn pos(tag: impl Into<String>) -> Self {
        Origin::Pos(tag.into())
    }

    /// Render as the wire/tag string, e.g. `NER_PERSON`, `POS_NOUN`.
    pub fn as_tag(&self) -> String {
        match self {
            Origin::Ner(tag) => format!("NER_{tag}"),
            Origin::Pos(tag) => format!("POS_{tag}"),
            Origin::Heuristic => "NER".to_string(),
            Origin::CamelCase => "camelCase".to_string(),
            Origin::Acronym => "acronym".to_string(),
            Origin::TechnicalTerm => "technicalTerm".to_string(),
        }
    }

    /// Parse a wire tag string back into an Origin.
    pub fn parse_tag(tag: &str) -> Self {
        if tag == "NER" {
            Origin::Heuristic
        } else if let Some(rest) = tag.strip_prefix("NER_") {
            Origin::Ner(rest.to_string())
        } else if let Some(rest) = tag.strip_prefix("POS_") {
            Origin::Pos(rest.to_string())
        } else {
            match tag {
                "camelCase" => Origin::CamelCase,
                "acronym" => Origin::Acronym,
                _ => Origin::TechnicalTerm,
            }
        }
    }
}

impl Serialize for Origin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_tag())
    }
}

impl<'de> Deserialize<'de> for Origin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Origin::parse_tag(&tag))
    }
}

/// A canonical entity extracted from a Chunk.
///
/// `id` is a pure function of `lemma` — see [`concept_id`]. Two
/// extractions of the same lemma always produce the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    pub lemma: String,
    pub surface: String,
    pub origin: Origin,
}

impl Concept {
    /// Build a Concept from a surface string, normalizing to a lemma and
    /// deriving the id. `origin` records which extraction path produced
    /// this mention.
    pub fn from_surface(surface: impl Into<String>, origin: Origin) -> Self {
        let surface = surface.into();
        let lemma = normalize_lemma(&surface);
        let id = concept_id(&lemma);
        Self {
            id,
            lemma,
            surface,
            origin,
        }
    }
}

/// `conceptId == first 16 hex chars of SHA-256(lemma as UTF-8)` (spec.md §3, §8).
pub fn concept_id(lemma: &str) -> String {
    let digest = Sha256::digest(lemma.as_bytes());
    hex::encode(digest)[..16].to_string()
}

/// Normalize a surface string to its canonical lemma form (spec.md §4.3):
///
/// 1. insert `_` at every lowercase→uppercase boundary
/// 2. lowercase the whole string
/// 3. replace any character outside `[a-z0-9_]` with `_`
/// 4. collapse consecutive underscores
/// 5. trim leading/trailing underscores
///
/// Stable across runs: normalizing a lemma twice equals normalizing it once.
pub fn normalize_lemma(surface: &str) -> String {
    let mut with_boundaries = String::with_capacity(surface.len() + 4);
    let mut prev_lower = false;
    for ch in surface.chars() {
        if prev_lower && ch.is_uppercase() {
            with_boundaries.push('_');
        }
        with_boundaries.push(ch);
        prev_lower = ch.is_lowercase();
    }

    let lowered = with_boundaries.to_lowercase();

    let mut cleaned = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            cleaned.push(ch);
        } else {
            cleaned.push('_');
        }
    }

    let mut collapsed = String::with_capacity(cleaned.len());
    let mut last_was_underscore = false;
    for ch in cleaned.chars() {
        if ch == '_' {
            if !last_was_underscore {
                collapsed.push('_');
            }
            last_was_underscore = true;
        } else {
            collapsed.push(ch);
            last_was_underscore = false;
        }
    }

    collapsed.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_inserts_underscore_at_camel_boundary() {
        assert_eq!(normalize_lemma("CamelCase"), "camel_case");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_lemma("Neo4j-Driver API");
        let twice = normalize_lemma(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_collapses_and_trims_underscores() {
        assert_eq!(normalize_lemma("  hello   world!! "), "hello_world");
    }

    #[test]
    fn normalize_replaces_non_allowed_chars() {
        assert_eq!(normalize_lemma("C++"), "c");
        assert_eq!(normalize_lemma("rest/api"), "rest_api");
    }

    #[test]
    fn concept_id_is_pure_function_of_lemma() {
        let a = Concept::from_surface("Neo4j", Origin::CamelCase);
        let b = Concept::from_surface("neo4j", Origin::Acronym);
        assert_eq!(a.id, b.id);
        assert_eq!(a.lemma, b.lemma);
    }

    #[test]
    fn concept_id_matches_sha256_prefix() {
        let lemma = "neo4j";
        let expected = {
            let digest = Sha256::digest(lemma.as_bytes());
            hex::encode(digest)[..16].to_string()
        };
        assert_eq!(concept_id(lemma), expected);
        assert_eq!(concept_id(lemma).len(), 16);
    }

    #[test]
    fn origin_tag_rendering() {
        assert_eq!(Origin::ner("PERSON").as_tag(), "NER_PERSON");
        assert_eq!(Origin::pos("NOUN").as_tag(), "POS_NOUN");
        assert_eq!(Origin::CamelCase.as_tag(), "camelCase");
    }
}
