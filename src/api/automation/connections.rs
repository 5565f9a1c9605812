//! Connection listing endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::connection::Connection;

/// GET /api/connections
pub async fn list_connections(
    State(state): State<AppState>,
) -> Result<Json<Vec<Connection>>, ApiError> {
    let connections = state.connection_service.list().await?;
    Ok(Json(connections))
}
