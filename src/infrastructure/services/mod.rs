//! Application services

pub mod connection_service;
pub mod workflow_service;

pub use connection_service::ConnectionService;
pub use workflow_service::{CreateWorkflowRequest, ExecutionOutcome, WorkflowService};
