//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application settings.

mod auth;
mod connection;
mod output;
mod planner;
mod session;
mod stages;

pub use auth::FileAuthConfig;
pub use connection::FileConnectionConfig;
pub use output::{FileLoggingConfig, FileOutputConfig};
pub use planner::FilePlannerConfig;
pub use session::FileSessionConfig;
pub use stages::FileStagesConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("{field} cannot be 0")]
    ZeroTimeout { field: &'static str },

    #[error("connection.min_fraction must be in (0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("session.roster entry {index} is empty")]
    EmptyRosterName { index: usize },

    #[error("stages.max_options cannot be 0")]
    NoOptions,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub session: FileSessionConfig,
    pub connection: FileConnectionConfig,
    pub auth: FileAuthConfig,
    pub planner: FilePlannerConfig,
    pub stages: FileStagesConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("connection.timeout_seconds", self.connection.timeout_seconds),
            ("planner.timeout_seconds", self.planner.timeout_seconds),
            ("stages.default_timeout_seconds", self.stages.default_timeout_seconds),
            ("stages.confirm_timeout_seconds", self.stages.confirm_timeout_seconds),
        ] {
            if value == 0 {
                issues.push(ConfigValidationError::ZeroTimeout { field });
            }
        }

        let fraction = self.connection.min_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            issues.push(ConfigValidationError::InvalidFraction(fraction));
        }

        for (index, name) in self.session.roster.iter().enumerate() {
            if name.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyRosterName { index });
            }
        }

        if self.stages.max_options == 0 {
            issues.push(ConfigValidationError::NoOptions);
        }

        issues
    }
}
