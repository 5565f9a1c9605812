//! Bot conversation state
//!
//! History and activity timestamps live here, behind one lock. The engine
//! itself is stateless; handlers read a snapshot and pass it in.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::bot::StatusSnapshot;
use crate::domain::DomainError;

/// Who produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
}

/// One entry in the bot conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotMessage {
    pub message: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: MessageKind,
}

#[derive(Debug)]
struct Inner {
    history: Vec<BotMessage>,
    last_activity: DateTime<Utc>,
}

/// Shared bot state; reset on restart
#[derive(Debug)]
pub struct BotState {
    started_at: DateTime<Utc>,
    inner: RwLock<Inner>,
}

impl Default for BotState {
    fn default() -> Self {
        Self::new()
    }
}

impl BotState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            inner: RwLock::new(Inner {
                history: Vec::new(),
                last_activity: now,
            }),
        }
    }

    /// Record an incoming user message
    pub fn record_user_message(
        &self,
        message: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.record(message, user_id, MessageKind::User)
    }

    /// Record the bot's reply
    pub fn record_bot_message(&self, message: impl Into<String>) -> Result<(), DomainError> {
        self.record(message, "bot", MessageKind::Bot)
    }

    fn record(
        &self,
        message: impl Into<String>,
        user_id: impl Into<String>,
        kind: MessageKind,
    ) -> Result<(), DomainError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        let now = Utc::now();
        inner.history.push(BotMessage {
            message: message.into(),
            user_id: user_id.into(),
            timestamp: now,
            kind,
        });
        inner.last_activity = now;

        Ok(())
    }

    /// The most recent `limit` history entries plus the total count
    pub fn history(&self, limit: usize) -> Result<(Vec<BotMessage>, usize), DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let total = inner.history.len();
        let start = total.saturating_sub(limit);
        Ok((inner.history[start..].to_vec(), total))
    }

    /// Current status, combined with a connection count from the caller
    pub fn snapshot(&self, active_connections: usize) -> Result<StatusSnapshot, DomainError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let uptime = Utc::now().signed_duration_since(self.started_at);

        Ok(StatusSnapshot {
            active: true,
            uptime_secs: uptime.num_seconds().max(0) as u64,
            message_count: inner.history.len(),
            active_connections,
            queue_length: 0,
            last_activity: inner.last_activity,
        })
    }
}
