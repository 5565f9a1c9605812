//! Bot command engine
//!
//! Classifies a free-text message, extracts parameters and produces a
//! formatted reply. Phone intent triggers exactly one simulated call; API
//! intent triggers exactly one real proxy call; everything else is a
//! template with no I/O.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::bot::{extract, CommandIntent, StatusSnapshot};
use crate::domain::proxy::{HttpMethod, ProxyRequest, RequestProxy};
use crate::domain::DomainError;
use crate::infrastructure::simulation;

const RESPONSE_PREVIEW_CHARS: usize = 500;

/// Stateless command engine; conversation state is owned by the caller
pub struct BotEngine {
    proxy: Arc<dyn RequestProxy>,
    bot_timeout_ms: u64,
    from_number: String,
}

impl std::fmt::Debug for BotEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotEngine")
            .field("bot_timeout_ms", &self.bot_timeout_ms)
            .field("from_number", &self.from_number)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct PhoneCallParams {
    to: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRequestParams {
    url: String,
    #[serde(default)]
    method: HttpMethod,
    #[serde(default)]
    headers: HashMap<String, String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

impl BotEngine {
    pub fn new(proxy: Arc<dyn RequestProxy>, bot_timeout_ms: u64, from_number: impl Into<String>) -> Self {
        Self {
            proxy,
            bot_timeout_ms,
            from_number: from_number.into(),
        }
    }

    /// Process one message and produce the reply text
    pub async fn respond(&self, message: &str, snapshot: &StatusSnapshot) -> String {
        let intent = CommandIntent::classify(message);
        tracing::debug!(?intent, "classified bot message");

        match intent {
            CommandIntent::PhoneCall => self.phone_reply(message),
            CommandIntent::ApiRequest => self.api_reply(message).await,
            CommandIntent::Workflow => Self::workflow_reply(),
            CommandIntent::Status => Self::status_reply(snapshot),
            CommandIntent::Help => Self::help_reply(),
            CommandIntent::Generic => Self::generic_reply(message),
        }
    }

    /// Run a structured command from `/bot/execute`
    pub async fn execute_action(
        &self,
        command: &str,
        parameters: Value,
        snapshot: &StatusSnapshot,
    ) -> Result<Value, DomainError> {
        match command {
            "phone_call" => {
                let params: PhoneCallParams = serde_json::from_value(parameters)
                    .map_err(|e| DomainError::validation(format!("Invalid parameters: {}", e)))?;

                let from = params.from.as_deref().unwrap_or(&self.from_number);
                Ok(simulation::initiate_phone_call(
                    &params.to,
                    from,
                    params.message.as_deref(),
                ))
            }
            "api_request" => {
                let params: ApiRequestParams = serde_json::from_value(parameters)
                    .map_err(|e| DomainError::validation(format!("Invalid parameters: {}", e)))?;

                let request = ProxyRequest {
                    url: params.url,
                    method: params.method,
                    headers: params.headers,
                    body: params.data,
                    timeout_ms: Some(params.timeout_ms.unwrap_or(self.bot_timeout_ms)),
                };

                let response = self.proxy.execute(request).await;
                serde_json::to_value(response)
                    .map_err(|e| DomainError::internal(format!("Failed to encode response: {}", e)))
            }
            "status_check" => Ok(Value::String(Self::status_reply(snapshot))),
            other => Err(DomainError::validation(format!(
                "Unknown command: {}",
                other
            ))),
        }
    }

    fn phone_reply(&self, message: &str) -> String {
        let Some(number) = extract::phone_number(message) else {
            return "📞 I can help you make a phone call! Please provide a phone number. \
                    Example: 'Call +1-555-123-4567'"
                .to_string();
        };

        let spoken = extract::call_message(message);
        let call = simulation::initiate_phone_call(number, &self.from_number, spoken.as_deref());

        format!(
            "✅ Phone call initiated successfully!\n\n\
             📞 **To:** {}\n\
             📝 **Message:** {}\n\
             🆔 **Call ID:** {}\n\
             ⏰ **Time:** {}",
            number,
            call["message"].as_str().unwrap_or(simulation::DEFAULT_CALL_MESSAGE),
            call["call_id"].as_str().unwrap_or("unknown"),
            chrono::Utc::now().to_rfc3339(),
        )
    }

    async fn api_reply(&self, message: &str) -> String {
        let Some(url) = extract::url(message) else {
            return "🌐 I can make API requests for you! Please provide a URL. \
                    Example: 'Make a GET request to https://api.example.com/data'"
                .to_string();
        };

        let method = extract::http_method(message).unwrap_or_default();
        let request = ProxyRequest {
            url: url.to_string(),
            method,
            headers: extract::headers(message),
            body: extract::data(message),
            timeout_ms: Some(self.bot_timeout_ms),
        };

        let response = self.proxy.execute(request).await;

        if !response.success {
            return format!(
                "❌ API request failed: {}",
                response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        let body = serde_json::to_string_pretty(&response.data).unwrap_or_default();
        let preview: String = body.chars().take(RESPONSE_PREVIEW_CHARS).collect();

        format!(
            "✅ API request completed!\n\n\
             🌐 **URL:** {}\n\
             📋 **Method:** {}\n\
             📊 **Status:** {}\n\
             📝 **Response:** {}...",
            url,
            method,
            response.status.map(|s| s.to_string()).unwrap_or_else(|| "unknown".to_string()),
            preview,
        )
    }

    fn workflow_reply() -> String {
        "🔄 **Workflow Command Received**\n\n\
         I can help you create and manage workflows. Here are some options:\n\n\
         • \"Create workflow for data sync\"\n\
         • \"Run workflow named 'Daily Backup'\"\n\
         • \"Show all workflows\"\n\
         • \"Stop workflow 'Emergency Alert'\"\n\n\
         What would you like to do with workflows?"
            .to_string()
    }

    fn status_reply(snapshot: &StatusSnapshot) -> String {
        let (hours, minutes) = snapshot.uptime_parts();

        format!(
            "🤖 **Bot Status Report**\n\n\
             🟢 **Status:** Online\n\
             ⏱️ **Uptime:** {}h {}m\n\
             📨 **Messages Processed:** {}\n\
             🔗 **Active Connections:** {}\n\
             ⏳ **Queue Length:** {}\n\
             🕐 **Last Activity:** {}",
            hours,
            minutes,
            snapshot.message_count,
            snapshot.active_connections,
            snapshot.queue_length,
            snapshot.last_activity.to_rfc3339(),
        )
    }

    fn help_reply() -> String {
        "🤖 **Zen Bot Commands**\n\n\
         📞 **Phone Calls:**\n\
         • \"Call +1-555-123-4567\"\n\
         • \"Phone +1-555-123-4567 and say 'Hello World'\"\n\n\
         🌐 **API Requests:**\n\
         • \"Make GET request to https://api.example.com/data\"\n\
         • \"POST to https://api.example.com/users with data {\"name\": \"John\"}\"\n\n\
         🔄 **Workflows:**\n\
         • \"Create workflow for data sync\"\n\
         • \"Run workflow 'Daily Backup'\"\n\
         • \"Show all workflows\"\n\n\
         📊 **Status:**\n\
         • \"What's your status?\"\n\
         • \"Bot health check\"\n\n\
         💬 **General:**\n\
         • Just type any message and I'll help!\n\
         • \"Help\" - Show this message\n\n\
         I'm here to help with API automation, phone calls, and workflow management!"
            .to_string()
    }

    fn generic_reply(message: &str) -> String {
        format!(
            "🤖 I understand you want to: \"{}\"\n\n\
             I can help you with:\n\
             📞 Making phone calls\n\
             🌐 Executing API requests\n\
             🔄 Managing workflows\n\
             📊 Checking system status\n\n\
             Try one of these commands or type \"help\" for more options!",
            message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proxy::ProxyResponse;
    use crate::infrastructure::proxy::mock::MockRequestProxy;
    use chrono::Utc;
    use serde_json::json;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            active: true,
            uptime_secs: 3700,
            message_count: 12,
            active_connections: 5,
            queue_length: 0,
            last_activity: Utc::now(),
        }
    }

    fn engine_with(proxy: MockRequestProxy) -> (BotEngine, Arc<MockRequestProxy>) {
        let proxy = Arc::new(proxy);
        (
            BotEngine::new(proxy.clone(), 10000, "+1234567890"),
            proxy,
        )
    }

    #[tokio::test]
    async fn test_phone_command_with_number() {
        let (engine, proxy) = engine_with(MockRequestProxy::new());

        let reply = engine
            .respond("Call +1-555-123-4567 and say \"Hello World\"", &snapshot())
            .await;

        assert!(reply.contains("Phone call initiated"));
        assert!(reply.contains("+1-555-123-4567"));
        assert!(reply.contains("Hello World"));
        // simulated call, no outbound request
        assert!(proxy.requests().is_empty());
    }

    #[tokio::test]
    async fn test_phone_command_without_number_prompts() {
        let (engine, proxy) = engine_with(MockRequestProxy::new());

        let reply = engine.respond("call my office", &snapshot()).await;

        assert!(reply.contains("provide a phone number"));
        assert!(proxy.requests().is_empty());
    }

    #[tokio::test]
    async fn test_api_command_extracts_url_and_method() {
        let (engine, proxy) = engine_with(MockRequestProxy::new().with_response(
            ProxyResponse::completed(200, json!({"ok": true}), HashMap::new()),
        ));

        let reply = engine
            .respond(
                "Make a POST request to https://api.example.com/users",
                &snapshot(),
            )
            .await;

        assert!(reply.contains("API request completed"));
        assert!(reply.contains("https://api.example.com/users"));
        assert!(reply.contains("POST"));
        assert!(reply.contains("200"));

        let requests = proxy.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::POST);
        assert_eq!(requests[0].timeout_ms, Some(10000));
    }

    #[tokio::test]
    async fn test_api_command_without_url_prompts() {
        let (engine, proxy) = engine_with(MockRequestProxy::new());

        let reply = engine.respond("make an api request", &snapshot()).await;

        assert!(reply.contains("provide a URL"));
        assert!(proxy.requests().is_empty());
    }

    #[tokio::test]
    async fn test_api_command_transport_failure() {
        let (engine, _) = engine_with(
            MockRequestProxy::new()
                .with_response(ProxyResponse::transport_failure("connection refused", None)),
        );

        let reply = engine
            .respond("curl https://unreachable.example.com", &snapshot())
            .await;

        assert!(reply.contains("API request failed"));
        assert!(reply.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_status_reply_reads_snapshot() {
        let (engine, proxy) = engine_with(MockRequestProxy::new());

        let reply = engine.respond("what's your status?", &snapshot()).await;

        assert!(reply.contains("Bot Status Report"));
        assert!(reply.contains("1h 1m"));
        assert!(reply.contains("Messages Processed:** 12"));
        assert!(reply.contains("Active Connections:** 5"));
        assert!(proxy.requests().is_empty());
    }

    #[tokio::test]
    async fn test_help_and_generic_replies() {
        let (engine, proxy) = engine_with(MockRequestProxy::new());

        let reply = engine.respond("help", &snapshot()).await;
        assert!(reply.contains("Zen Bot Commands"));

        let reply = engine.respond("tell me a joke", &snapshot()).await;
        assert!(reply.contains("I understand you want to: \"tell me a joke\""));

        assert!(proxy.requests().is_empty());
    }

    #[tokio::test]
    async fn test_execute_action_phone_call() {
        let (engine, _) = engine_with(MockRequestProxy::new());

        let result = engine
            .execute_action(
                "phone_call",
                json!({"to": "+15551234567", "message": "Hi"}),
                &snapshot(),
            )
            .await
            .unwrap();

        assert_eq!(result["to"], "+15551234567");
        assert_eq!(result["from"], "+1234567890");
        assert_eq!(result["message"], "Hi");
        assert_eq!(result["status"], "initiated");
    }

    #[tokio::test]
    async fn test_execute_action_api_request() {
        let (engine, proxy) = engine_with(MockRequestProxy::new().with_response(
            ProxyResponse::completed(201, json!({"id": 9}), HashMap::new()),
        ));

        let result = engine
            .execute_action(
                "api_request",
                json!({"url": "https://api.example.com/users", "method": "POST"}),
                &snapshot(),
            )
            .await
            .unwrap();

        assert_eq!(result["success"], true);
        assert_eq!(result["status"], 201);
        assert_eq!(proxy.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_action_unknown_command() {
        let (engine, _) = engine_with(MockRequestProxy::new());

        let result = engine
            .execute_action("dance", Value::Null, &snapshot())
            .await;

        let error = result.unwrap_err();
        assert!(error.to_string().contains("Unknown command: dance"));
    }

    #[tokio::test]
    async fn test_execute_action_rejects_bad_parameters() {
        let (engine, _) = engine_with(MockRequestProxy::new());

        let result = engine
            .execute_action("phone_call", json!({"message": "no number"}), &snapshot())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }
}
