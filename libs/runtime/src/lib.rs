//! Process-level plumbing shared by the server binary: layered configuration
//! and tracing subscriber setup.

pub mod config;
pub mod logging;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section, ServerConfig};
