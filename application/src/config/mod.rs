//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`PipelineSettings`]: stage timeouts, option limits and defaults for the outing pipeline
//! - [`ConnectionSettings`]: whether and how long to wait for the connection quorum

pub mod connection_settings;
pub mod pipeline_settings;

pub use connection_settings::ConnectionSettings;
pub use pipeline_settings::PipelineSettings;
