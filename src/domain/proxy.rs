//! Outbound request proxy contract
//!
//! The proxy performs one real HTTP call on behalf of a workflow step or a
//! bot command and normalizes every outcome into a [`ProxyResponse`]. An
//! upstream 4xx/5xx is still a successful proxy call; only transport-level
//! failures (DNS, refused connection, timeout) produce `success: false`.
//! The trait is infallible by design: implementations must never surface an
//! unhandled fault to the caller.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP request method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    /// Get the method as an uppercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::DELETE => "DELETE",
            Self::PATCH => "PATCH",
            Self::HEAD => "HEAD",
            Self::OPTIONS => "OPTIONS",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One outbound request to be executed by the proxy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyRequest {
    /// Target URL (any syntactically valid absolute URL)
    pub url: String,

    /// HTTP method, defaults to GET
    #[serde(default)]
    pub method: HttpMethod,

    /// Request headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Optional JSON body, forwarded as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// Timeout in milliseconds; falls back to the proxy default when absent
    #[serde(default, alias = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ProxyRequest {
    /// Create a GET request for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::GET,
            headers: HashMap::new(),
            body: None,
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

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// Normalized result of one proxy invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyResponse {
    /// Whether the transport-level call completed
    pub success: bool,

    /// Upstream status code, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Upstream body (parsed JSON when possible, raw text otherwise)
    #[serde(default)]
    pub data: Value,

    /// Upstream response headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Human-readable error, present iff `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProxyResponse {
    /// A completed call; the upstream status may be any code, including 4xx/5xx
    pub fn completed(status: u16, data: Value, headers: HashMap<String, String>) -> Self {
        Self {
            success: true,
            status: Some(status),
            data,
            headers,
            error: None,
        }
    }

    /// A transport-level failure (DNS, refused connection, timeout)
    pub fn transport_failure(error: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            success: false,
            status,
            data: Value::Null,
            headers: HashMap::new(),
            error: Some(error.into()),
        }
    }
}

/// Trait for outbound request execution (for mocking)
#[async_trait]
pub trait RequestProxy: Send + Sync + std::fmt::Debug {
    /// Execute one outbound call; all failure modes are normalized into the
    /// response value, so this never returns an error
    async fn execute(&self, request: ProxyRequest) -> ProxyResponse;
}
