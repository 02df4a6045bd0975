//! Stage configuration from TOML (`[stages]` section)

use huddle_application::PipelineSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStagesConfig {
    pub default_timeout_seconds: u64,
    pub confirm_timeout_seconds: u64,
    pub max_options: usize,
    pub default_preferences: Vec<String>,
}

impl Default for FileStagesConfig {
    fn default() -> Self {
        let settings = PipelineSettings::default();
        Self {
            default_timeout_seconds: settings.stage_timeout.as_secs(),
            confirm_timeout_seconds: settings.confirm_timeout.as_secs(),
            max_options: settings.max_options,
            default_preferences: settings.default_preferences,
        }
    }
}

impl FileStagesConfig {
    pub fn to_settings(&self) -> PipelineSettings {
        PipelineSettings::default()
            .with_stage_timeout(Duration::from_secs(self.default_timeout_seconds))
            .with_confirm_timeout(Duration::from_secs(self.confirm_timeout_seconds))
            .with_max_options(self.max_options)
            .with_default_preferences(self.default_preferences.iter().cloned())
    }
}
