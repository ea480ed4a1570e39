//! Request handlers.
//!
//! Thin glue: resolve the adapter through the dispatcher, await the
//! single adapter call, and let the error envelope do the rest.

use axum::Json;
use axum::extract::{Path, Query, State};
use homeops_core::{NormalizedResult, Payload, ResourceKind};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::actions::ActionRecord;
use crate::dispatch::{Operation, dispatch};
use crate::error::ApiError;
use crate::state::AppState;

/// Unauthenticated liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /v1/docker/containers
pub async fn list_containers(
    State(state): State<AppState>,
) -> Result<Json<NormalizedResult>, ApiError> {
    let result = dispatch(&state.registry, ResourceKind::Containers, Operation::List).await?;
    Ok(Json(result))
}

/// GET /v1/docker/containers/{id}/stats
pub async fn container_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NormalizedResult>, ApiError> {
    let result = dispatch(
        &state.registry,
        ResourceKind::Containers,
        Operation::Detail(id),
    )
    .await?;
    Ok(Json(result))
}

/// GET /v1/emby/sessions
pub async fn emby_sessions(
    State(state): State<AppState>,
) -> Result<Json<NormalizedResult>, ApiError> {
    let result = dispatch(&state.registry, ResourceKind::Sessions, Operation::List).await?;
    Ok(Json(result))
}

/// Query string for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text search term; empty returns the full catalog.
    #[serde(default)]
    pub q: String,
}

/// GET /v1/emby/search?q=
pub async fn emby_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<NormalizedResult>, ApiError> {
    let result = dispatch(
        &state.registry,
        ResourceKind::Media,
        Operation::Search(query.q),
    )
    .await?;
    Ok(Json(result))
}

/// Body of the action-execution endpoint.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub params: Value,
}

/// POST /v1/actions/execute
///
/// Never invokes an adapter upstream; the action is logged, not run.
pub async fn execute_action(
    State(state): State<AppState>,
    Json(body): Json<ActionRequest>,
) -> Result<Json<NormalizedResult>, ApiError> {
    let ack = state.actions.execute(&body.action, body.params)?;
    Ok(Json(NormalizedResult::live(Payload::ActionAck(ack))))
}

/// GET /v1/actions/log
pub async fn action_log(State(state): State<AppState>) -> Json<Vec<ActionRecord>> {
    Json(state.actions.snapshot())
}
