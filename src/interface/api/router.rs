//! API Router configuration

use super::callbacks_handler::handle_callbacks;
use super::calls_handler::create_call;
use super::health_handler::health_check;
use super::metrics_handler::metrics_handler;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Health check route
    let health_routes = Router::new().route("/health", get(health_check));

    // Call automation routes
    let call_routes = Router::new()
        .route("/api/calls", post(create_call))
        .route("/api/callbacks", post(handle_callbacks));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    // Combine routes with state
    Router::new()
        .merge(health_routes)
        .merge(call_routes)
        .with_state(state)
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
}
