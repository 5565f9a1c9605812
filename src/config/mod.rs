//! Application configuration

pub mod app_config;

pub use app_config::{AppConfig, BotConfig, HttpConfig, LogFormat, LoggingConfig, ServerConfig};
