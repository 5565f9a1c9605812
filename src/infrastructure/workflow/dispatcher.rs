//! Sequential step dispatcher

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::domain::proxy::RequestProxy;
use crate::domain::workflow::{ExecutionRecord, StepConfig, StepDispatcher, StepResult};
use crate::infrastructure::simulation;

/// Runs steps strictly in order, one at a time
///
/// A failing step is recorded and the sequence continues; the overall record
/// reports failure if any step failed.
#[derive(Debug)]
pub struct SequentialDispatcher {
    proxy: Arc<dyn RequestProxy>,
    default_timeout_ms: u64,
}

impl SequentialDispatcher {
    pub fn new(proxy: Arc<dyn RequestProxy>, default_timeout_ms: u64) -> Self {
        Self {
            proxy,
            default_timeout_ms,
        }
    }

    async fn run_step(&self, step: &StepConfig) -> StepResult {
        match step {
            StepConfig::Request(config) => {
                let response = self
                    .proxy
                    .execute(config.to_proxy_request(self.default_timeout_ms))
                    .await;

                if response.success {
                    StepResult::completed("request", response.status, response.data)
                } else {
                    let mut result = StepResult::failed(
                        "request",
                        response
                            .error
                            .unwrap_or_else(|| "Request failed".to_string()),
                    );
                    result.status = response.status;
                    result
                }
            }
            StepConfig::PhoneCall(config) => StepResult::completed(
                "phone_call",
                None,
                simulation::phone_call_analysis(config),
            ),
            StepConfig::SiteGenerate(config) => {
                StepResult::completed("site_generate", None, simulation::site_generation(config))
            }
            StepConfig::Unknown(unknown) => StepResult::failed(
                unknown.step_type.clone(),
                format!("Unknown step type: {}", unknown.step_type),
            ),
        }
    }
}

#[async_trait]
impl StepDispatcher for SequentialDispatcher {
    async fn run(&self, steps: &[StepConfig]) -> ExecutionRecord {
        let started = Instant::now();
        let mut results = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            tracing::debug!(index, step_type = step.type_name(), "running step");

            let result = self.run_step(step).await;
            if !result.success {
                tracing::warn!(
                    index,
                    step_type = step.type_name(),
                    error = result.error.as_deref().unwrap_or("unknown"),
                    "step failed"
                );
            }

            results.push(result);
        }

        ExecutionRecord::from_results(results, started.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proxy::{HttpMethod, ProxyResponse};
    use crate::domain::workflow::{
        PhoneCallConfig, RequestConfig, SiteGenerateConfig, UnknownStep,
    };
    use crate::infrastructure::proxy::mock::MockRequestProxy;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_one_result_per_step_in_order() {
        let proxy = Arc::new(MockRequestProxy::new());
        let dispatcher = SequentialDispatcher::new(proxy, 30000);

        let steps = vec![
            StepConfig::PhoneCall(PhoneCallConfig::new("+1-555-123-4567")),
            StepConfig::SiteGenerate(SiteGenerateConfig::default()),
            StepConfig::Request(RequestConfig::new("https://api.example.com/data")),
        ];

        let record = dispatcher.run(&steps).await;

        assert_eq!(record.results.len(), 3);
        assert!(record.success);
        assert_eq!(record.results[0].step_type, "phone_call");
        assert_eq!(record.results[1].step_type, "site_generate");
        assert_eq!(record.results[2].step_type, "request");
    }

    #[tokio::test]
    async fn test_unknown_step_fails_without_aborting() {
        let proxy = Arc::new(MockRequestProxy::new());
        let dispatcher = SequentialDispatcher::new(proxy, 30000);

        let steps = vec![
            StepConfig::Unknown(UnknownStep {
                step_type: "teleport".to_string(),
                config: Value::Null,
            }),
            StepConfig::PhoneCall(PhoneCallConfig::new("+1-555-123-4567")),
        ];

        let record = dispatcher.run(&steps).await;

        assert!(!record.success);
        assert_eq!(record.results.len(), 2);
        assert!(!record.results[0].success);
        assert_eq!(
            record.results[0].error.as_deref(),
            Some("Unknown step type: teleport")
        );
        // the sequence continued past the failure
        assert!(record.results[1].success);
    }

    #[tokio::test]
    async fn test_request_step_uses_proxy() {
        let proxy = Arc::new(
            MockRequestProxy::new().with_response(ProxyResponse::completed(
                404,
                json!({"error": "missing"}),
                HashMap::new(),
            )),
        );
        let dispatcher = SequentialDispatcher::new(proxy.clone(), 30000);

        let steps = vec![StepConfig::Request(
            RequestConfig::new("https://api.example.com/missing").with_method(HttpMethod::POST),
        )];

        let record = dispatcher.run(&steps).await;

        // upstream 404 is still a completed call
        assert!(record.success);
        assert_eq!(record.results[0].status, Some(404));

        let requests = proxy.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::POST);
        assert_eq!(requests[0].timeout_ms, Some(30000));
    }

    #[tokio::test]
    async fn test_transport_failure_fails_the_step() {
        let proxy = Arc::new(
            MockRequestProxy::new()
                .with_response(ProxyResponse::transport_failure("connection refused", None)),
        );
        let dispatcher = SequentialDispatcher::new(proxy, 30000);

        let steps = vec![StepConfig::Request(RequestConfig::new(
            "http://127.0.0.1:9/unreachable",
        ))];

        let record = dispatcher.run(&steps).await;

        assert!(!record.success);
        assert_eq!(
            record.results[0].error.as_deref(),
            Some("connection refused")
        );
    }

    #[tokio::test]
    async fn test_empty_sequence() {
        let proxy = Arc::new(MockRequestProxy::new());
        let dispatcher = SequentialDispatcher::new(proxy, 30000);

        let record = dispatcher.run(&[]).await;
        assert!(record.success);
        assert!(record.results.is_empty());
    }
}
