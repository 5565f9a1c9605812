//! Step dispatch contract and execution results

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::step_types::StepConfig;

/// Outcome of a single dispatched step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Step type that produced this result
    #[serde(rename = "type")]
    pub step_type: String,

    /// Whether the step completed
    pub success: bool,

    /// Upstream status code, for request steps that reached the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Step output payload
    #[serde(default)]
    pub data: Value,

    /// Failure description, present iff `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResult {
    /// A completed step
    pub fn completed(step_type: impl Into<String>, status: Option<u16>, data: Value) -> Self {
        Self {
            step_type: step_type.into(),
            success: true,
            status,
            data,
            error: None,
        }
    }

    /// A failed step
    pub fn failed(step_type: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            step_type: step_type.into(),
            success: false,
            status: None,
            data: Value::Null,
            error: Some(error.into()),
        }
    }
}

/// Result of dispatching a full step sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Whether every step in the sequence completed
    pub success: bool,

    /// Per-step outcomes, in sequence order
    pub results: Vec<StepResult>,

    /// Wall-clock duration of the whole run in milliseconds
    pub duration_ms: u64,
}

impl ExecutionRecord {
    /// Build a record from per-step outcomes; the run succeeds only when
    /// every step did
    pub fn from_results(results: Vec<StepResult>, duration_ms: u64) -> Self {
        Self {
            success: results.iter().all(|r| r.success),
            results,
            duration_ms,
        }
    }

    /// Number of steps that completed
    pub fn completed_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}

/// Trait for running a step sequence (for mocking)
///
/// A failing step never aborts the run: the dispatcher records the failure
/// and continues with the remaining steps.
#[async_trait]
pub trait StepDispatcher: Send + Sync + std::fmt::Debug {
    /// Run every step in order and collect the outcomes
    async fn run(&self, steps: &[StepConfig]) -> ExecutionRecord;
}
