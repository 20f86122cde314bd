//! Thin `axum` projection of the query surface (S9, spec.md §4.8): three
//! GET routes, each deserializing its params and delegating straight to
//! the `query` module. No business logic lives here, grounded in
//! `charlenopires-poc_semantic`'s `web::create_router` / `web::handlers`
//! split between routing and logic.

use crate::error::QueryError;
use crate::query::GraphReader;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<dyn GraphReader>,
}

/// Build the router: `/concepts/:id`, `/concepts/:id/evidence`,
/// `/concepts/:id/neighborhood`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/concepts/:id", get(find_concept))
        .route("/concepts/:id/evidence", get(evidence_trail))
        .route("/concepts/:id/neighborhood", get(neighborhood))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    error: String,
}

impl IntoResponse for QueryErrorResponse {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            QueryError::NotFound(_) => StatusCode::NOT_FOUND,
            QueryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorPayload { error: self.0.to_string() })).into_response()
    }
}

struct QueryErrorResponse(QueryError);

impl From<QueryError> for QueryErrorResponse {
    fn from(err: QueryError) -> Self {
        Self(err)
    }
}

async fn find_concept(
    State(state): State<AppState>,
    Path(lemma_or_id): Path<String>,
) -> Result<Json<crate::query::ConceptRecord>, QueryErrorResponse> {
    match state.reader.find_concept(&lemma_or_id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(QueryError::NotFound(lemma_or_id).into()),
    }
}

async fn evidence_trail(
    State(state): State<AppState>,
    Path(concept_id): Path<String>,
) -> Result<Json<Vec<crate::query::EvidenceEntry>>, QueryErrorResponse> {
    let trail = state.reader.evidence_trail(&concept_id).await?;
    Ok(Json(trail))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NeighborhoodParams {
    #[serde(default = "default_depth")]
    depth: u32,
    #[serde(default = "default_min_confidence")]
    min_confidence: f64,
}

fn default_depth() -> u32 {
    1
}

fn default_min_confidence() -> f64 {
    0.0
}

async fn neighborhood(
    State(state): State<AppState>,
    Path(concept_id): Path<String>,
    Query(params): Query<NeighborhoodParams>,
) -> Result<Json<crate::query::Neighborhood>, QueryErrorResponse> {
    let result = state
        .reader
        .neighborhood(&concept_id, params.depth, params.min_confidence)
        .await?;
    Ok(Json(result))
}
