//! HTTP API layer

pub mod automation;
pub mod bot;
pub mod health;
pub mod router;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::AppState;
