//! Planning collaborator configuration from TOML (`[planner]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlannerConfig {
    /// HTTP endpoint of the planning service; the built-in catalog is used when unset
    pub endpoint: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for FilePlannerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_seconds: 60,
        }
    }
}
