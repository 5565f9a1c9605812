//! Bot API endpoints

use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::bot::BotMessage;

const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Request body for POST /bot/message
#[derive(Debug, Clone, Deserialize)]
pub struct BotMessageBody {
    pub message: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

/// Response for POST /bot/message
#[derive(Debug, Serialize)]
pub struct BotMessageResponse {
    pub success: bool,
    pub response: String,
    pub timestamp: String,
    pub bot_status: bool,
}

/// Response for GET /bot/status
#[derive(Debug, Serialize)]
pub struct BotStatusResponse {
    pub status: &'static str,
    pub last_activity: DateTime<Utc>,
    pub message_count: usize,
    pub active_connections: usize,
    pub queue_length: usize,
    pub uptime: u64,
}

/// Query parameters for GET /bot/history
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response for GET /bot/history
#[derive(Debug, Serialize)]
pub struct BotHistoryResponse {
    pub success: bool,
    pub history: Vec<BotMessage>,
    pub total: usize,
}

/// Request body for POST /bot/execute
#[derive(Debug, Clone, Deserialize)]
pub struct BotExecuteBody {
    pub command: String,
    #[serde(default)]
    pub parameters: Value,
}

/// Response for POST /bot/execute
#[derive(Debug, Serialize)]
pub struct BotExecuteResponse {
    pub success: bool,
    pub result: Value,
    pub timestamp: String,
}

/// POST /bot/message
pub async fn post_message(
    State(state): State<AppState>,
    Json(body): Json<BotMessageBody>,
) -> Result<Json<BotMessageResponse>, ApiError> {
    debug!(user_id = %body.user_id, "bot received message");

    state
        .bot_state
        .record_user_message(&body.message, &body.user_id)?;

    let active_connections = state.connection_service.connected_count().await?;
    let snapshot = state.bot_state.snapshot(active_connections)?;

    let response = state.bot_engine.respond(&body.message, &snapshot).await;

    state.bot_state.record_bot_message(&response)?;

    Ok(Json(BotMessageResponse {
        success: true,
        response,
        timestamp: Utc::now().to_rfc3339(),
        bot_status: true,
    }))
}

/// GET /bot/status
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<BotStatusResponse>, ApiError> {
    let active_connections = state.connection_service.connected_count().await?;
    let snapshot = state.bot_state.snapshot(active_connections)?;

    Ok(Json(BotStatusResponse {
        status: if snapshot.active { "online" } else { "offline" },
        last_activity: snapshot.last_activity,
        message_count: snapshot.message_count,
        active_connections: snapshot.active_connections,
        queue_length: snapshot.queue_length,
        uptime: snapshot.uptime_secs,
    }))
}

/// GET /bot/history
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<BotHistoryResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let (history, total) = state.bot_state.history(limit)?;

    Ok(Json(BotHistoryResponse {
        success: true,
        history,
        total,
    }))
}

/// POST /bot/execute
pub async fn execute_command(
    State(state): State<AppState>,
    Json(body): Json<BotExecuteBody>,
) -> Result<Json<BotExecuteResponse>, ApiError> {
    debug!(command = %body.command, "bot executing command");

    let active_connections = state.connection_service.connected_count().await?;
    let snapshot = state.bot_state.snapshot(active_connections)?;

    let result = state
        .bot_engine
        .execute_action(&body.command, body.parameters, &snapshot)
        .await?;

    Ok(Json(BotExecuteResponse {
        success: true,
        result,
        timestamp: Utc::now().to_rfc3339(),
    }))
}
