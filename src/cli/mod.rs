//! CLI module for Zen Automator
//!
//! Provides subcommands for running the backend:
//! - `serve`: run the HTTP API server (default)

pub mod serve;

use clap::{Parser, Subcommand};

/// Zen Automator - demo automation backend
#[derive(Parser)]
#[command(name = "zen-automator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}
