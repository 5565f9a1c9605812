//! Aggregate statistics endpoint

use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};

/// Response for GET /api/stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_connections: usize,
    pub active_connections: usize,
    pub total_workflows: usize,
    pub enabled_workflows: usize,
    pub messages_processed: usize,
    pub timestamp: String,
}

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let total_connections = state.connection_service.count().await?;
    let active_connections = state.connection_service.connected_count().await?;
    let total_workflows = state.workflow_service.count().await?;
    let enabled_workflows = state.workflow_service.enabled_count().await?;
    let snapshot = state.bot_state.snapshot(active_connections)?;

    Ok(Json(StatsResponse {
        total_connections,
        active_connections,
        total_workflows,
        enabled_workflows,
        messages_processed: snapshot.message_count,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
