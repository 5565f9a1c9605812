//! Workflow step type definitions
//!
//! A step is a tagged `{type, config}` pair. Payload shapes are declared per
//! variant so the dispatcher can match exhaustively; tags that no variant
//! claims are preserved in [`UnknownStep`] so the dispatcher can report the
//! offending type instead of rejecting the whole sequence at the JSON
//! boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::proxy::{HttpMethod, ProxyRequest};

/// One workflow step: a type tag plus its type-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum StepConfig {
    /// Real outbound HTTP call via the request proxy
    Request(RequestConfig),

    /// Simulated phone call analysis
    PhoneCall(PhoneCallConfig),

    /// Simulated website generation
    SiteGenerate(SiteGenerateConfig),

    /// Any tag the dispatcher does not recognize
    #[serde(untagged)]
    Unknown(UnknownStep),
}

impl StepConfig {
    /// Get a human-readable type name
    pub fn type_name(&self) -> &str {
        match self {
            Self::Request(_) => "request",
            Self::PhoneCall(_) => "phone_call",
            Self::SiteGenerate(_) => "site_generate",
            Self::Unknown(step) => &step.step_type,
        }
    }
}

/// Configuration for a `request` step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestConfig {
    /// Target URL (required)
    pub url: String,

    /// HTTP method, defaults to GET
    #[serde(default)]
    pub method: HttpMethod,

    /// Request headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Optional JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Per-step timeout override in milliseconds
    #[serde(default, alias = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RequestConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::GET,
            headers: HashMap::new(),
            data: None,
            timeout_ms: None,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Build the proxy request for this step, applying the dispatcher's
    /// default timeout when the step declares none
    pub fn to_proxy_request(&self, default_timeout_ms: u64) -> ProxyRequest {
        ProxyRequest {
            url: self.url.clone(),
            method: self.method,
            headers: self.headers.clone(),
            body: self.data.clone(),
            timeout_ms: Some(self.timeout_ms.unwrap_or(default_timeout_ms)),
        }
    }
}

/// Configuration for a `phone_call` step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PhoneCallConfig {
    /// Number to call; the simulation echoes it back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Optional message spoken during the simulated call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PhoneCallConfig {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Configuration for a `site_generate` step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SiteGenerateConfig {
    /// Domain for the simulated site, defaults to a placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Site template name, defaults to "modern"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// A step whose type tag matched no known variant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnknownStep {
    /// The unrecognized type tag
    #[serde(rename = "type")]
    pub step_type: String,

    /// Raw configuration payload, kept for diagnostics
    #[serde(default)]
    pub config: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_step_serialization() {
        let step = StepConfig::Request(
            RequestConfig::new("https://api.example.com/data")
                .with_method(HttpMethod::POST)
                .with_header("X-Token", "abc"),
        );

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"type\":\"request\""));
        assert!(json.contains("\"url\":\"https://api.example.com/data\""));
        assert!(json.contains("\"method\":\"POST\""));

        let decoded: StepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(step, decoded);
    }

    #[test]
    fn test_request_step_defaults() {
        let step: StepConfig = serde_json::from_str(
            r#"{"type": "request", "config": {"url": "https://example.com"}}"#,
        )
        .unwrap();

        match step {
            StepConfig::Request(config) => {
                assert_eq!(config.method, HttpMethod::GET);
                assert!(config.headers.is_empty());
                assert!(config.timeout_ms.is_none());
            }
            other => panic!("expected request step, got {:?}", other),
        }
    }

    #[test]
    fn test_phone_call_step_round_trip() {
        let step = StepConfig::PhoneCall(
            PhoneCallConfig::new("+1-555-123-4567").with_message("Hello"),
        );

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"type\":\"phone_call\""));

        let decoded: StepConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(step, decoded);
    }

    #[test]
    fn test_unknown_step_is_preserved() {
        let step: StepConfig = serde_json::from_str(
            r#"{"type": "teleport", "config": {"destination": "mars"}}"#,
        )
        .unwrap();

        match &step {
            StepConfig::Unknown(unknown) => {
                assert_eq!(unknown.step_type, "teleport");
                assert_eq!(unknown.config, json!({"destination": "mars"}));
            }
            other => panic!("expected unknown step, got {:?}", other),
        }

        assert_eq!(step.type_name(), "teleport");
    }

    #[test]
    fn test_unknown_step_without_config() {
        let step: StepConfig = serde_json::from_str(r#"{"type": "delay"}"#).unwrap();

        match step {
            StepConfig::Unknown(unknown) => {
                assert_eq!(unknown.step_type, "delay");
                assert_eq!(unknown.config, Value::Null);
            }
            other => panic!("expected unknown step, got {:?}", other),
        }
    }

    #[test]
    fn test_to_proxy_request_uses_default_timeout() {
        let config = RequestConfig::new("https://example.com");
        let request = config.to_proxy_request(30000);
        assert_eq!(request.timeout_ms, Some(30000));

        let config = RequestConfig::new("https://example.com").with_timeout_ms(5000);
        let request = config.to_proxy_request(30000);
        assert_eq!(request.timeout_ms, Some(5000));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(
            StepConfig::Request(RequestConfig::new("https://x")).type_name(),
            "request"
        );
        assert_eq!(
            StepConfig::PhoneCall(PhoneCallConfig::default()).type_name(),
            "phone_call"
        );
        assert_eq!(
            StepConfig::SiteGenerate(SiteGenerateConfig::default()).type_name(),
            "site_generate"
        );
    }
}
