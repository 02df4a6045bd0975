//! Infrastructure layer for huddle
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod auth;
pub mod channel;
pub mod config;
pub mod logging;
pub mod planner;

// Re-export commonly used types
pub use auth::{HttpTokenExchange, OfflineTokenExchange};
pub use channel::{InMemoryChannel, OutboundMessage};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAuthConfig, FileConfig, FileConnectionConfig,
    FileLoggingConfig, FileOutputConfig, FilePlannerConfig, FileSessionConfig, FileStagesConfig,
};
pub use logging::JsonlSessionLogger;
pub use planner::{CatalogPlanner, HttpPlanner};
