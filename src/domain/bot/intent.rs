//! Chat command classification
//!
//! Classification is keyword-based and ordered: the first matching category
//! wins, so "call the api" is a phone command, not an API command.

/// What the user is asking the bot to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandIntent {
    /// Place a (simulated) phone call
    PhoneCall,
    /// Execute an outbound HTTP request
    ApiRequest,
    /// Workflow management guidance
    Workflow,
    /// Bot status report
    Status,
    /// Command listing
    Help,
    /// Anything else
    Generic,
}

impl CommandIntent {
    /// Classify a raw chat message
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let lower = lower.trim();

        if lower.contains("call") || lower.contains("phone") {
            return Self::PhoneCall;
        }

        if lower.contains("api") || lower.contains("request") || lower.contains("curl") {
            return Self::ApiRequest;
        }

        if lower.contains("workflow") || lower.contains("automate") {
            return Self::Workflow;
        }

        if lower.contains("status") || lower.contains("health") {
            return Self::Status;
        }

        if lower.contains("help") || lower.contains("commands") {
            return Self::Help;
        }

        Self::Generic
    }
}
