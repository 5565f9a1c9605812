//! Shared application state for API handlers

use std::sync::Arc;

use crate::domain::proxy::RequestProxy;
use crate::infrastructure::bot::{BotEngine, BotState};
use crate::infrastructure::services::{ConnectionService, WorkflowService};

/// State shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    pub workflow_service: Arc<WorkflowService>,
    pub connection_service: Arc<ConnectionService>,
    pub proxy: Arc<dyn RequestProxy>,
    pub bot_engine: Arc<BotEngine>,
    pub bot_state: Arc<BotState>,
}

impl AppState {
    pub fn new(
        workflow_service: Arc<WorkflowService>,
        connection_service: Arc<ConnectionService>,
        proxy: Arc<dyn RequestProxy>,
        bot_engine: Arc<BotEngine>,
        bot_state: Arc<BotState>,
    ) -> Self {
        Self {
            workflow_service,
            connection_service,
            proxy,
            bot_engine,
            bot_state,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}
