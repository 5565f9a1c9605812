//! Bot engine and conversation state

pub mod engine;
pub mod state;

pub use engine::BotEngine;
pub use state::{BotMessage, BotState, MessageKind};
