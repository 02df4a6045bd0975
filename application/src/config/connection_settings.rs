//! Connection quorum settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Controls the optional authorization gate before the first stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Skip the gate entirely when false.
    pub enabled: bool,
    /// Deadline for the whole quorum wait.
    pub timeout: Duration,
    /// Fraction of the roster that must connect, in `(0, 1]`.
    pub min_fraction: f64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(300),
            min_fraction: 0.5,
        }
    }
}

impl ConnectionSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_min_fraction(mut self, fraction: f64) -> Self {
        self.min_fraction = fraction;
        self
    }
}
