//! Parse (S2): decode a raw record line into a typed Chunk, dropping
//! malformed records with a warning (spec.md §4.2, §6).

use crate::error::ParseError;
use crate::graph::{Chunk, Span};
use serde::Deserialize;
use tracing::warn;

/// Wire shape of one input line (spec.md §6): every field optional here
/// so unknown fields are naturally ignored and a missing required field
/// produces a named `ParseError::MissingField` instead of an opaque JSON
/// decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChunkRecord {
    chunk_id: Option<String>,
    doc_id: Option<String>,
    span: Option<Span>,
    text: Option<String>,
    source_uri: Option<String>,
    hash: Option<String>,
}

/// Decode one line into a Chunk, or `None` if the line is malformed.
/// Per spec.md §4.2, a malformed record never fails the pipeline — it is
/// logged and dropped.
pub fn parse_line(line: &str) -> Option<Chunk> {
    match decode(line) {
        Ok(chunk) => Some(chunk),
        Err(err) => {
            warn!(error = %err, "dropping malformed input record");
            None
        }
    }
}

fn decode(line: &str) -> Result<Chunk, ParseError> {
    let raw: RawChunkRecord = serde_json::from_str(line)?;
    Ok(Chunk::new(
        raw.chunk_id.ok_or(ParseError::MissingField("chunkId"))?,
        raw.doc_id.ok_or(ParseError::MissingField("docId"))?,
        raw.span.ok_or(ParseError::MissingField("span"))?,
        raw.text.ok_or(ParseError::MissingField("text"))?,
        raw.source_uri.ok_or(ParseError::MissingField("sourceUri"))?,
        raw.hash.ok_or(ParseError::MissingField("hash"))?,
    ))
}
