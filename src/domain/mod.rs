//! Core domain types and contracts

pub mod bot;
pub mod connection;
pub mod error;
pub mod proxy;
pub mod storage;
pub mod workflow;

pub use error::DomainError;
