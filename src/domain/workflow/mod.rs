//! Workflow domain: entities, step types and the dispatch contract

pub mod entity;
pub mod executor;
pub mod step_types;

pub use entity::{Workflow, WorkflowId, MAX_ID_LENGTH};
pub use executor::{ExecutionRecord, StepDispatcher, StepResult};
pub use step_types::{
    PhoneCallConfig, RequestConfig, SiteGenerateConfig, StepConfig, UnknownStep,
};
