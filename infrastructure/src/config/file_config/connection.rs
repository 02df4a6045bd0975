//! Connection quorum configuration from TOML (`[connection]` section)

use huddle_application::ConnectionSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConnectionConfig {
    /// Wait for participants to connect before the first stage
    pub enabled: bool,
    pub timeout_seconds: u64,
    /// Fraction of the roster that must connect, in `(0, 1]`
    pub min_fraction: f64,
}

impl Default for FileConnectionConfig {
    fn default() -> Self {
        let settings = ConnectionSettings::default();
        Self {
            enabled: settings.enabled,
            timeout_seconds: settings.timeout.as_secs(),
            min_fraction: settings.min_fraction,
        }
    }
}

impl FileConnectionConfig {
    pub fn to_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            enabled: self.enabled,
            timeout: Duration::from_secs(self.timeout_seconds),
            min_fraction: self.min_fraction,
        }
    }
}
