use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus a summary of the loaded keyword dictionary.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let categories: Vec<&str> = state.dictionary.categories().map(|c| c.as_str()).collect();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matchmaker",
        "dictionary": {
            "categories": categories,
            "keywords": state.dictionary.keyword_count()
        }
    }))
}
