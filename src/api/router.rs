use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::automation;
use super::bot;
use super::health;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Automation API
        .route("/api/connections", get(automation::connections::list_connections))
        .route(
            "/api/workflows",
            get(automation::workflows::list_workflows).post(automation::workflows::create_workflow),
        )
        .route("/api/workflows/execute", post(automation::workflows::execute_steps))
        .route(
            "/api/workflows/{id}",
            get(automation::workflows::get_workflow).delete(automation::workflows::delete_workflow),
        )
        .route(
            "/api/workflows/{id}/execute",
            post(automation::workflows::execute_workflow),
        )
        .route("/api/execute-curl", post(automation::proxy::execute_curl))
        .route("/api/test-connection", post(automation::proxy::test_connection))
        .route("/api/stats", get(automation::stats::get_stats))
        // Bot API
        .route("/bot/message", post(bot::post_message))
        .route("/bot/status", get(bot::get_status))
        .route("/bot/history", get(bot::get_history))
        .route("/bot/execute", post(bot::execute_command))
        // State and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
