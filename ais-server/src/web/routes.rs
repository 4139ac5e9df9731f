//! REST API route handlers.

use std::sync::{Arc, PoisonError};

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::web::AppState;

/// GET /data: vessels of the last completed snapshot window.
pub async fn api_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot.read().unwrap_or_else(PoisonError::into_inner);
    Json(serde_json::to_value(&*snapshot).unwrap_or(json!([])))
}

/// GET /api/stats: running totals since the feed connected.
pub async fn api_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let counts = state
        .collector
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .counts;
    let vessels = state
        .snapshot
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .len();

    let mut stats: Value = serde_json::to_value(counts).unwrap_or(json!({}));
    stats["vessels"] = json!(vessels);
    Json(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
