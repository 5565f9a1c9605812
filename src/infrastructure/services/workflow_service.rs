//! Workflow service - CRUD and execution

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::Storage;
use crate::domain::workflow::{
    ExecutionRecord, StepConfig, StepDispatcher, Workflow, WorkflowId,
};
use crate::domain::DomainError;

/// Request to create a new workflow
#[derive(Debug, Clone)]
pub struct CreateWorkflowRequest {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub steps: Vec<StepConfig>,
    pub enabled: bool,
}

impl CreateWorkflowRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            steps: Vec::new(),
            enabled: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_steps(mut self, steps: Vec<StepConfig>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_step(mut self, step: StepConfig) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Outcome of one workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub execution_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,

    #[serde(flatten)]
    pub record: ExecutionRecord,
}

/// Workflow service for CRUD operations and execution
pub struct WorkflowService {
    storage: Arc<dyn Storage<Workflow>>,
    dispatcher: Arc<dyn StepDispatcher>,
}

impl std::fmt::Debug for WorkflowService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowService").finish()
    }
}

impl WorkflowService {
    pub fn new(storage: Arc<dyn Storage<Workflow>>, dispatcher: Arc<dyn StepDispatcher>) -> Self {
        Self {
            storage,
            dispatcher,
        }
    }

    /// Get a workflow by ID
    pub async fn get(&self, id: &str) -> Result<Option<Workflow>, DomainError> {
        let workflow_id = WorkflowId::new(id)?;
        self.storage.get(&workflow_id).await
    }

    /// List all workflows
    pub async fn list(&self) -> Result<Vec<Workflow>, DomainError> {
        self.storage.list().await
    }

    /// Number of stored workflows
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    /// Number of enabled workflows
    pub async fn enabled_count(&self) -> Result<usize, DomainError> {
        let workflows = self.storage.list().await?;
        Ok(workflows.iter().filter(|w| w.enabled).count())
    }

    /// Create a new workflow
    pub async fn create(&self, request: CreateWorkflowRequest) -> Result<Workflow, DomainError> {
        let workflow_id = WorkflowId::new(&request.id)?;

        if self.storage.exists(&workflow_id).await? {
            return Err(DomainError::conflict(format!(
                "Workflow '{}' already exists",
                request.id
            )));
        }

        self.validate_steps(&request.steps)?;

        let mut workflow = Workflow::new(workflow_id, request.name);

        if let Some(description) = request.description {
            workflow = workflow.with_description(description);
        }

        workflow = workflow
            .with_steps(request.steps)
            .with_enabled(request.enabled);

        self.storage.create(workflow).await
    }

    /// Delete a workflow, returns true if one was removed
    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let workflow_id = WorkflowId::new(id)?;
        self.storage.delete(&workflow_id).await
    }

    /// Execute a stored workflow's steps
    pub async fn execute(&self, id: &str) -> Result<ExecutionOutcome, DomainError> {
        let workflow_id = WorkflowId::new(id)?;

        let workflow = self
            .storage
            .get(&workflow_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Workflow '{}' not found", id)))?;

        if !workflow.enabled {
            return Err(DomainError::validation(format!(
                "Workflow '{}' is disabled",
                id
            )));
        }

        tracing::info!(workflow_id = %workflow.id, steps = workflow.steps.len(), "executing workflow");

        let record = self.dispatcher.run(&workflow.steps).await;

        Ok(ExecutionOutcome {
            execution_id: Uuid::new_v4().to_string(),
            workflow_id: Some(workflow.id.to_string()),
            record,
        })
    }

    /// Execute an ad-hoc step sequence without storing it
    pub async fn execute_steps(&self, steps: &[StepConfig]) -> Result<ExecutionOutcome, DomainError> {
        self.validate_steps(steps)?;

        let record = self.dispatcher.run(steps).await;

        Ok(ExecutionOutcome {
            execution_id: Uuid::new_v4().to_string(),
            workflow_id: None,
            record,
        })
    }

    /// Reject step sequences that could never run
    ///
    /// Unknown step types pass validation on purpose; they fail at execution
    /// time with a per-step error.
    fn validate_steps(&self, steps: &[StepConfig]) -> Result<(), DomainError> {
        for step in steps {
            if let StepConfig::Request(config) = step {
                if config.url.is_empty() {
                    return Err(DomainError::validation("Request step requires a url"));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proxy::ProxyResponse;
    use crate::domain::workflow::{PhoneCallConfig, RequestConfig, UnknownStep};
    use crate::infrastructure::proxy::mock::MockRequestProxy;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::workflow::SequentialDispatcher;
    use serde_json::Value;

    fn service() -> WorkflowService {
        service_with_proxy(MockRequestProxy::new())
    }

    fn service_with_proxy(proxy: MockRequestProxy) -> WorkflowService {
        let storage: Arc<dyn Storage<Workflow>> = Arc::new(InMemoryStorage::new());
        let dispatcher = Arc::new(SequentialDispatcher::new(Arc::new(proxy), 30000));
        WorkflowService::new(storage, dispatcher)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();

        let created = service
            .create(
                CreateWorkflowRequest::new("daily-sync", "Daily Sync")
                    .with_description("Sync the things")
                    .with_step(StepConfig::PhoneCall(PhoneCallConfig::new("+15551234567"))),
            )
            .await
            .unwrap();

        assert_eq!(created.name, "Daily Sync");

        let fetched = service.get("daily-sync").await.unwrap().unwrap();
        assert_eq!(fetched.steps.len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let service = service();

        service
            .create(CreateWorkflowRequest::new("daily-sync", "Daily Sync"))
            .await
            .unwrap();

        let result = service
            .create(CreateWorkflowRequest::new("daily-sync", "Another"))
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_id() {
        let service = service();

        let result = service
            .create(CreateWorkflowRequest::new("bad id!", "Bad"))
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::InvalidId { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_request_step_without_url() {
        let service = service();

        let result = service
            .create(
                CreateWorkflowRequest::new("daily-sync", "Daily Sync")
                    .with_step(StepConfig::Request(RequestConfig::new(""))),
            )
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_execute_missing_workflow() {
        let service = service();

        let result = service.execute("missing").await;
        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_execute_disabled_workflow() {
        let service = service();

        service
            .create(CreateWorkflowRequest::new("paused", "Paused").with_enabled(false))
            .await
            .unwrap();

        let result = service.execute("paused").await;
        assert!(matches!(result.unwrap_err(), DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_execute_runs_all_steps() {
        let service = service_with_proxy(MockRequestProxy::new().with_response(
            ProxyResponse::completed(200, Value::Null, Default::default()),
        ));

        service
            .create(
                CreateWorkflowRequest::new("daily-sync", "Daily Sync")
                    .with_step(StepConfig::Request(RequestConfig::new(
                        "https://api.example.com/sync",
                    )))
                    .with_step(StepConfig::PhoneCall(PhoneCallConfig::new("+15551234567"))),
            )
            .await
            .unwrap();

        let outcome = service.execute("daily-sync").await.unwrap();

        assert!(outcome.record.success);
        assert_eq!(outcome.record.results.len(), 2);
        assert_eq!(outcome.workflow_id.as_deref(), Some("daily-sync"));
        assert!(!outcome.execution_id.is_empty());
    }

    #[tokio::test]
    async fn test_execute_steps_with_unknown_type() {
        let service = service();

        let outcome = service
            .execute_steps(&[StepConfig::Unknown(UnknownStep {
                step_type: "teleport".to_string(),
                config: Value::Null,
            })])
            .await
            .unwrap();

        assert!(!outcome.record.success);
        assert!(outcome.workflow_id.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();

        service
            .create(CreateWorkflowRequest::new("daily-sync", "Daily Sync"))
            .await
            .unwrap();

        assert!(service.delete("daily-sync").await.unwrap());
        assert!(!service.delete("daily-sync").await.unwrap());
        assert!(service.get("daily-sync").await.unwrap().is_none());
    }
}
