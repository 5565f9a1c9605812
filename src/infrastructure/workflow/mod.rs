//! Workflow execution infrastructure

pub mod dispatcher;

pub use dispatcher::SequentialDispatcher;
