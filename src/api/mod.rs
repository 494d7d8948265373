//! REST API for simulation results and telemetry.
//!
//! Provides three GET endpoints:
//! - `/state` — scenario echo, run summary, and latest hour
//! - `/telemetry` — full hour records with optional range filtering
//! - `/hours/{hour}` — single-hour detail for the click-driven panel

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::ScenarioConfig;
use crate::sim::results::SimResults;
use crate::sim::summary::RunSummary;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the simulation run completes and wrapped in
/// `Arc` — no locks needed since all data is read-only.
pub struct AppState {
    /// Scenario configuration used for this run.
    pub config: ScenarioConfig,
    /// Aggregate run summary.
    pub summary: RunSummary,
    /// Per-hour simulation results.
    pub results: SimResults,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/telemetry", get(handlers::get_telemetry))
        .route("/hours/{hour}", get(handlers::get_hour))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
