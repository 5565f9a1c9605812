//! Outbound request proxy backed by reqwest

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::proxy::{HttpMethod, ProxyRequest, ProxyResponse, RequestProxy};

/// Real proxy that performs the outbound call with a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestProxy {
    client: reqwest::Client,
    default_timeout_ms: u64,
}

impl ReqwestProxy {
    pub fn new(default_timeout_ms: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            default_timeout_ms,
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.to_string(), v.to_string()))
        })
        .collect()
}

#[async_trait]
impl RequestProxy for ReqwestProxy {
    async fn execute(&self, request: ProxyRequest) -> ProxyResponse {
        let timeout_ms = request.timeout_ms.unwrap_or(self.default_timeout_ms);

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url)
            .timeout(Duration::from_millis(timeout_ms));

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            timeout_ms,
            "executing outbound request"
        );

        // an upstream error status is still a completed call; only transport
        // failures become success: false
        match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let headers = collect_headers(response.headers());

                let data = match response.text().await {
                    Ok(text) if text.is_empty() => Value::Null,
                    Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
                    Err(error) => {
                        return ProxyResponse::transport_failure(
                            format!("Failed to read response body: {}", error),
                            Some(status),
                        );
                    }
                };

                ProxyResponse::completed(status, data, headers)
            }
            Err(error) => {
                tracing::warn!(url = %request.url, %error, "outbound request failed");
                ProxyResponse::transport_failure(
                    error.to_string(),
                    error.status().map(|s| s.as_u16()),
                )
            }
        }
    }
}
