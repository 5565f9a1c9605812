//! Workflow CRUD and execution endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::workflow::{StepConfig, Workflow};
use crate::infrastructure::services::{CreateWorkflowRequest, ExecutionOutcome};

/// Request body for POST /api/workflows
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkflowBody {
    /// Storage id; derived from the name when omitted
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Request body for POST /api/workflows/execute
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteStepsBody {
    pub steps: Vec<StepConfig>,
}

/// Envelope for execution responses
#[derive(Debug, Serialize)]
pub struct ExecutionResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: ExecutionOutcome,
    pub timestamp: String,
}

impl ExecutionResponse {
    fn new(outcome: ExecutionOutcome) -> Self {
        Self {
            success: outcome.record.success,
            outcome,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Derive a storage id from a display name
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    let truncated: String = slug
        .trim_end_matches('-')
        .chars()
        .take(crate::domain::workflow::MAX_ID_LENGTH)
        .collect();
    truncated.trim_end_matches('-').to_string()
}

/// GET /api/workflows
pub async fn list_workflows(State(state): State<AppState>) -> Result<Json<Vec<Workflow>>, ApiError> {
    let workflows = state.workflow_service.list().await?;
    Ok(Json(workflows))
}

/// POST /api/workflows
pub async fn create_workflow(
    State(state): State<AppState>,
    Json(body): Json<CreateWorkflowBody>,
) -> Result<Response, ApiError> {
    let id = match body.id {
        Some(id) => id,
        None => slugify(&body.name),
    };

    debug!(id = %id, name = %body.name, "creating workflow");

    let mut request = CreateWorkflowRequest::new(id, body.name)
        .with_steps(body.steps)
        .with_enabled(body.enabled);

    if let Some(description) = body.description {
        request = request.with_description(description);
    }

    let workflow = state.workflow_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(workflow)).into_response())
}

/// GET /api/workflows/{id}
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Workflow>, ApiError> {
    let workflow = state
        .workflow_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Workflow '{}' not found", id)))?;

    Ok(Json(workflow))
}

/// DELETE /api/workflows/{id}
pub async fn delete_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.workflow_service.delete(&id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Workflow '{}' not found", id)))
    }
}

/// POST /api/workflows/{id}/execute
pub async fn execute_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExecutionResponse>, ApiError> {
    debug!(id = %id, "executing stored workflow");

    let outcome = state.workflow_service.execute(&id).await?;
    Ok(Json(ExecutionResponse::new(outcome)))
}

/// POST /api/workflows/execute
pub async fn execute_steps(
    State(state): State<AppState>,
    Json(body): Json<ExecuteStepsBody>,
) -> Result<Json<ExecutionResponse>, ApiError> {
    debug!(steps = body.steps.len(), "executing inline step sequence");

    let outcome = state.workflow_service.execute_steps(&body.steps).await?;
    Ok(Json(ExecutionResponse::new(outcome)))
}
