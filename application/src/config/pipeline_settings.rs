//! Pipeline settings: stage timing and option limits.
//!
//! [`PipelineSettings`] parameterises [`outing_pipeline`](crate::pipeline::outing_pipeline).
//! The infrastructure layer builds it from the `[stages]` config section.

use huddle_domain::QuorumRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// How long each non-confirmation stage waits for replies.
    pub stage_timeout: Duration,
    /// How long the final yes/no question waits.
    pub confirm_timeout: Duration,
    /// Upper bound on numbered options offered per choice stage.
    pub max_options: usize,
    /// Preferences used when nobody answers the opening question.
    pub default_preferences: Vec<String>,
    /// Yes votes needed to confirm, measured against the roster.
    pub confirmation_rule: QuorumRule,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            stage_timeout: Duration::from_secs(300),
            confirm_timeout: Duration::from_secs(120),
            max_options: 5,
            default_preferences: vec!["outdoor".to_string(), "park".to_string()],
            confirmation_rule: QuorumRule::HalfOfRoster,
        }
    }
}

impl PipelineSettings {
    // ==================== Builder Methods ====================

    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    pub fn with_max_options(mut self, max: usize) -> Self {
        self.max_options = max;
        self
    }

    pub fn with_default_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_preferences = preferences.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_confirmation_rule(mut self, rule: QuorumRule) -> Self {
        self.confirmation_rule = rule;
        self
    }
}
