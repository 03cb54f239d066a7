//! HTTP API over the [`Dashboard`]
//!
//! All routes are `GET` and answer JSON. CORS is permissive so a dashboard
//! page served from elsewhere can poll the API.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::query::{
    CallFlowResponse, ChartResponse, ConfigResponse, CoreStatusResponse, Dashboard,
    EventsResponse, HealthResponse, MetricsResponse, SummaryResponse,
};

pub const METRICS_PATH: &str = "/api/metrics";
pub const EVENTS_PATH: &str = "/api/events";
pub const SUMMARY_PATH: &str = "/api/summary";
pub const HEALTH_PATH: &str = "/api/health";
pub const CONFIG_PATH: &str = "/api/config";
pub const CORE_STATUS_PATH: &str = "/api/open5gs";
pub const CHARTS_PATH: &str = "/api/charts";
pub const CALL_FLOW_PATH: &str = "/api/call-flow";

/// Build the API router
pub fn router(dashboard: Dashboard) -> Router {
    Router::new()
        .route(METRICS_PATH, get(metrics))
        .route(EVENTS_PATH, get(events))
        .route(SUMMARY_PATH, get(summary))
        .route(HEALTH_PATH, get(health))
        .route(CONFIG_PATH, get(config))
        .route(CORE_STATUS_PATH, get(core_status))
        .route(CHARTS_PATH, get(charts))
        .route(CALL_FLOW_PATH, get(call_flow))
        .layer(CorsLayer::permissive())
        .with_state(dashboard)
}

/// Serve `router` on `listener` until `shutdown` resolves
///
/// # Errors
/// Returns error if the server fails while accepting connections
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Dashboard API listening on http://{}", addr);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {}", e))
}

async fn metrics(State(dash): State<Dashboard>) -> Json<MetricsResponse> {
    Json(dash.get_metrics())
}

async fn events(State(dash): State<Dashboard>) -> Json<EventsResponse> {
    Json(dash.get_events())
}

async fn summary(State(dash): State<Dashboard>) -> Json<SummaryResponse> {
    Json(dash.get_summary())
}

async fn health(State(dash): State<Dashboard>) -> Json<HealthResponse> {
    Json(dash.get_health())
}

async fn config(State(dash): State<Dashboard>) -> Json<ConfigResponse> {
    Json(dash.get_config())
}

async fn core_status(State(dash): State<Dashboard>) -> Json<CoreStatusResponse> {
    Json(dash.get_external_core_status())
}

async fn charts(State(dash): State<Dashboard>) -> Json<ChartResponse> {
    Json(dash.get_chart_data())
}

async fn call_flow(State(dash): State<Dashboard>) -> Json<CallFlowResponse> {
    Json(dash.get_call_flow())
}
