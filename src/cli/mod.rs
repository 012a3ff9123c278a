//! CLI module
//!
//! Command-line interface for the radio backend.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP API server
//! - `check` - Validate the configuration and report what it loads
//! - `tracks` - Print pages of the play history

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{router, serve, AppState};
