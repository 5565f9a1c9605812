//! Zen Automator
//!
//! Demo automation backend with three pillars:
//! - An outbound HTTP request proxy (`/api/execute-curl` and `request` steps)
//! - Workflow storage and sequential step execution
//! - A command bot that classifies chat messages and triggers actions

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::connection::{Connection, ConnectionKind, ConnectionStatus};
use domain::proxy::HttpMethod;
use domain::workflow::{
    PhoneCallConfig, RequestConfig, SiteGenerateConfig, StepConfig, Workflow, WorkflowId,
};
use infrastructure::bot::{BotEngine, BotState};
use infrastructure::proxy::ReqwestProxy;
use infrastructure::services::{ConnectionService, WorkflowService};
use infrastructure::storage::InMemoryStorage;
use infrastructure::workflow::SequentialDispatcher;

/// Create the application state with default configuration
pub fn create_app_state() -> AppState {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state, wiring services around a shared proxy
pub fn create_app_state_with_config(config: &AppConfig) -> AppState {
    let proxy = Arc::new(ReqwestProxy::new(config.http.workflow_timeout_ms));

    let workflow_storage = Arc::new(InMemoryStorage::<Workflow>::with_entities(
        default_workflows(),
    ));
    let connection_storage = Arc::new(InMemoryStorage::<Connection>::with_entities(
        default_connections(),
    ));

    let dispatcher = Arc::new(SequentialDispatcher::new(
        proxy.clone(),
        config.http.workflow_timeout_ms,
    ));

    let workflow_service = Arc::new(WorkflowService::new(workflow_storage, dispatcher));
    let connection_service = Arc::new(ConnectionService::new(connection_storage));

    let bot_engine = Arc::new(BotEngine::new(
        proxy.clone(),
        config.http.bot_timeout_ms,
        &config.bot.from_number,
    ));
    let bot_state = Arc::new(BotState::new());

    AppState::new(
        workflow_service,
        connection_service,
        proxy,
        bot_engine,
        bot_state,
    )
}

// ============================================================================
// Default Entities
// ============================================================================

fn default_connections() -> Vec<Connection> {
    vec![
        Connection::new("1", "OpenAI API", ConnectionKind::Ai, ConnectionStatus::Connected),
        Connection::new(
            "2",
            "Twilio",
            ConnectionKind::Communication,
            ConnectionStatus::Connected,
        ),
        Connection::new(
            "3",
            "Stripe",
            ConnectionKind::Payment,
            ConnectionStatus::Disconnected,
        ),
        Connection::new(
            "4",
            "SendGrid",
            ConnectionKind::Email,
            ConnectionStatus::Connected,
        ),
        Connection::new(
            "5",
            "GitHub",
            ConnectionKind::Development,
            ConnectionStatus::Connected,
        ),
        Connection::new(
            "6",
            "Slack",
            ConnectionKind::Communication,
            ConnectionStatus::Connected,
        ),
    ]
}

fn default_workflows() -> Vec<Workflow> {
    vec![
        Workflow::new(
            WorkflowId::new("daily-health-check").unwrap(),
            "Daily API Health Check",
        )
        .with_description("Pings the public endpoints and reports status")
        .with_step(StepConfig::Request(RequestConfig::new(
            "https://httpbin.org/status/200",
        )))
        .with_step(StepConfig::Request(
            RequestConfig::new("https://httpbin.org/post")
                .with_method(HttpMethod::POST)
                .with_data(serde_json::json!({"check": "daily"})),
        )),
        Workflow::new(
            WorkflowId::new("customer-onboarding").unwrap(),
            "Customer Onboarding",
        )
        .with_description("Welcome call followed by a site for the new customer")
        .with_step(StepConfig::PhoneCall(
            PhoneCallConfig::new("+1-555-010-0001")
                .with_message("Welcome aboard! Your workspace is ready."),
        ))
        .with_step(StepConfig::SiteGenerate(SiteGenerateConfig {
            domain: Some("customer.example.com".to_string()),
            template: Some("modern".to_string()),
        })),
        Workflow::new(
            WorkflowId::new("social-media-poster").unwrap(),
            "Social Media Poster",
        )
        .with_description("Posts the daily update to the social API")
        .with_step(StepConfig::Request(
            RequestConfig::new("https://httpbin.org/post")
                .with_method(HttpMethod::POST)
                .with_header("Content-Type", "application/json")
                .with_data(serde_json::json!({"text": "Daily update from Zen Automator"})),
        ))
        .with_enabled(false),
    ]
}
