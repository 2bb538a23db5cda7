pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/documents/analyze",
            post(handlers::handle_analyze),
        )
        .route("/api/v1/match", post(handlers::handle_match))
        .route(
            "/api/v1/rank/candidates",
            post(handlers::handle_rank_candidates),
        )
        .route("/api/v1/rank/jobs", post(handlers::handle_rank_jobs))
        .with_state(state)
}
