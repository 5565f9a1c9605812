//! Direct outbound request endpoints

use std::collections::HashMap;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::proxy::{HttpMethod, ProxyRequest, ProxyResponse};

/// Request body for POST /api/execute-curl
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteCurlBody {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, alias = "timeout")]
    pub timeout_ms: Option<u64>,
}

/// POST /api/execute-curl
///
/// Always responds 200: transport failures are reported inside the body via
/// `success: false`, mirroring the proxy contract.
pub async fn execute_curl(
    State(state): State<AppState>,
    Json(body): Json<ExecuteCurlBody>,
) -> Json<ProxyResponse> {
    debug!(url = %body.url, method = %body.method, "direct proxy request");

    let request = ProxyRequest {
        url: body.url,
        method: body.method,
        headers: body.headers,
        body: body.data,
        timeout_ms: body.timeout_ms,
    };

    Json(state.proxy.execute(request).await)
}

/// Request body for POST /api/test-connection
#[derive(Debug, Clone, Deserialize)]
pub struct TestConnectionBody {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Response for POST /api/test-connection
#[derive(Debug, Serialize)]
pub struct TestConnectionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/test-connection
///
/// Connectivity probe: unlike the curl endpoint, a non-2xx upstream status
/// counts as a failed test and responds 400.
pub async fn test_connection(
    State(state): State<AppState>,
    Json(body): Json<TestConnectionBody>,
) -> Response {
    debug!(url = %body.url, method = %body.method, "testing connection");

    let request = ProxyRequest {
        url: body.url,
        method: body.method,
        headers: body.headers,
        body: None,
        timeout_ms: None,
    };

    let started = Instant::now();
    let response = state.proxy.execute(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let reachable = response.success && response.status.is_some_and(|s| (200..300).contains(&s));

    if reachable {
        Json(TestConnectionResponse {
            success: true,
            status: response.status,
            response_time_ms: Some(elapsed_ms),
            error: None,
        })
        .into_response()
    } else {
        let error = response.error.unwrap_or_else(|| {
            format!(
                "Connection test failed with status {}",
                response
                    .status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            )
        });

        (
            StatusCode::BAD_REQUEST,
            Json(TestConnectionResponse {
                success: false,
                status: response.status,
                response_time_ms: None,
                error: Some(error),
            }),
        )
            .into_response()
    }
}
