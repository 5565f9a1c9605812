//! Automation API endpoints

pub mod connections;
pub mod proxy;
pub mod stats;
pub mod workflows;
