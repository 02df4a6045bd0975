//! Configuration file loading for huddle
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `HUDDLE_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./huddle.toml` or `./.huddle.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/huddle/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAuthConfig, FileConfig, FileConnectionConfig, FileLoggingConfig,
    FileOutputConfig, FilePlannerConfig, FileSessionConfig, FileStagesConfig,
};
pub use loader::ConfigLoader;
