//! Router assembly.

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::state::AppState;

/// Build the gateway router.
///
/// `/health` sits outside the auth layer; everything under `/v1` passes
/// the gate first.
pub fn create_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route("/docker/containers", get(handlers::list_containers))
        .route(
            "/docker/containers/{id}/stats",
            get(handlers::container_stats),
        )
        .route("/emby/sessions", get(handlers::emby_sessions))
        .route("/emby/search", get(handlers::emby_search))
        .route("/actions/execute", post(handlers::execute_action))
        .route("/actions/log", get(handlers::action_log))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin_key,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
