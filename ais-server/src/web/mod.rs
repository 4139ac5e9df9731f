//! Web server: axum JSON API over the live feed's snapshots.
//!
//! The feed task writes into the collector on every event and swaps the
//! published snapshot each interval; handlers only read.

use std::sync::{Arc, Mutex, RwLock};

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::feed::{Collector, ShipData};

pub mod routes;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    /// Window currently being filled by the feed.
    pub collector: Mutex<Collector>,
    /// Last completed window.
    pub snapshot: RwLock<Vec<ShipData>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/data", axum::routing::get(routes::api_data))
        .route("/api/stats", axum::routing::get(routes::api_stats))
        .with_state(state)
        .layer(cors)
}

/// Start the web server. Returns once the listener fails.
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> std::io::Result<()> {
    let app = build_router(state);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("AIS dashboard listening on http://{addr}");
    axum::serve(listener, app).await
}
