//! Session configuration from TOML (`[session]` section)

use huddle_domain::Roster;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Channel the session posts to
    pub channel: String,
    /// City the outing is planned in
    pub city: String,
    /// Participant names
    pub roster: Vec<String>,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            channel: "general".to_string(),
            city: "San Francisco".to_string(),
            roster: Vec::new(),
        }
    }
}

impl FileSessionConfig {
    /// Roster with blank names dropped and duplicates collapsed
    pub fn roster(&self) -> Roster {
        Roster::new(
            self.roster
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty()),
        )
    }
}
