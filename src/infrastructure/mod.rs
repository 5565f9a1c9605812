//! Infrastructure implementations of the domain contracts

pub mod bot;
pub mod logging;
pub mod proxy;
pub mod services;
pub mod simulation;
pub mod storage;
pub mod workflow;
