//! Bot domain: command classification and parameter extraction

pub mod extract;
pub mod intent;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use intent::CommandIntent;

/// Point-in-time view of the bot used to render status replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Whether the bot is accepting messages
    pub active: bool,

    /// Seconds since the bot started
    pub uptime_secs: u64,

    /// Messages recorded in the history (user and bot combined)
    pub message_count: usize,

    /// Connections currently reported as connected
    pub active_connections: usize,

    /// Pending queued executions; always zero until queueing lands
    pub queue_length: usize,

    /// Timestamp of the last processed message
    pub last_activity: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Uptime split into whole hours and remaining minutes
    pub fn uptime_parts(&self) -> (u64, u64) {
        (self.uptime_secs / 3600, (self.uptime_secs % 3600) / 60)
    }
}
