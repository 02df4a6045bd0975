//! Stage definitions for the sequential pipeline

use super::aggregation::AggregationPolicy;
use crate::plan::PlanKind;
use crate::session::state::SessionState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Identifier of a pipeline stage (e.g. `budget`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(String);

impl StageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StageId {
    fn from(s: &str) -> Self {
        StageId::new(s)
    }
}

impl From<String> for StageId {
    fn from(s: String) -> Self {
        StageId::new(s)
    }
}

/// Renders a stage prompt from the state accumulated so far
pub type PromptFn = Arc<dyn Fn(&SessionState) -> String + Send + Sync>;

/// One question/decision step of the pipeline
///
/// Static configuration: nothing here changes while a session runs.
///
/// # Example
///
/// ```
/// use huddle_domain::{AggregationPolicy, PlanKind, SessionState, StageDefinition};
/// use std::time::Duration;
///
/// let stage = StageDefinition::new(
///     "budget",
///     AggregationPolicy::BudgetTier,
///     |_state: &SessionState| "Budget? low / medium / high".to_string(),
/// )
/// .with_timeout(Duration::from_secs(120))
/// .with_min_responses(3)
/// .then_plan(PlanKind::Locations);
///
/// assert_eq!(stage.id.as_str(), "budget");
/// assert_eq!(stage.planning, vec![PlanKind::Locations]);
/// ```
#[derive(Clone)]
pub struct StageDefinition {
    pub id: StageId,
    prompt: PromptFn,
    pub timeout: Duration,
    pub min_responses: usize,
    pub aggregation: AggregationPolicy,
    /// Collaborator calls made after the stage resolves
    pub planning: Vec<PlanKind>,
    /// Recommendation list the numbered options refer to
    pub choices_from: Option<PlanKind>,
}

impl StageDefinition {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new<F>(id: impl Into<StageId>, aggregation: AggregationPolicy, prompt: F) -> Self
    where
        F: Fn(&SessionState) -> String + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            prompt: Arc::new(prompt),
            timeout: Self::DEFAULT_TIMEOUT,
            min_responses: 1,
            aggregation,
            planning: Vec::new(),
            choices_from: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_min_responses(mut self, min: usize) -> Self {
        self.min_responses = min;
        self
    }

    pub fn then_plan(mut self, kind: PlanKind) -> Self {
        self.planning.push(kind);
        self
    }

    pub fn with_choices_from(mut self, kind: PlanKind) -> Self {
        self.choices_from = Some(kind);
        self
    }

    pub fn render_prompt(&self, state: &SessionState) -> String {
        (self.prompt)(state)
    }

    /// Number of options a choice stage offers given the current state
    ///
    /// `min(max_options, |options|)` when the options come from a
    /// collaborator list, else `max_options`. Zero for non-choice stages.
    pub fn option_count(&self, state: &SessionState) -> usize {
        let Some(max) = self.aggregation.max_options() else {
            return 0;
        };
        match self.choices_from {
            Some(kind) => max.min(state.plan(kind).len()),
            None => max,
        }
    }
}

impl std::fmt::Debug for StageDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageDefinition")
            .field("id", &self.id)
            .field("timeout", &self.timeout)
            .field("min_responses", &self.min_responses)
            .field("aggregation", &self.aggregation)
            .field("planning", &self.planning)
            .field("choices_from", &self.choices_from)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Recommendation;

    fn choice_stage() -> StageDefinition {
        StageDefinition::new(
            "location",
            AggregationPolicy::NumericMean { max_options: 3 },
            |state: &SessionState| format!("{} options", state.plan(PlanKind::Locations).len()),
        )
        .with_choices_from(PlanKind::Locations)
    }

    #[test]
    fn test_defaults() {
        let stage = StageDefinition::new("x", AggregationPolicy::BudgetTier, |_: &SessionState| {
            String::new()
        });
        assert_eq!(stage.timeout, StageDefinition::DEFAULT_TIMEOUT);
        assert_eq!(stage.min_responses, 1);
        assert!(stage.planning.is_empty());
        assert_eq!(stage.option_count(&SessionState::new("Oslo", 2)), 0);
    }

    #[test]
    fn test_option_count_limited_by_available_plans() {
        let stage = choice_stage();
        let mut state = SessionState::new("Oslo", 3);
        assert_eq!(stage.option_count(&state), 0);

        state.record_plan(
            PlanKind::Locations,
            vec![Recommendation::new("A"), Recommendation::new("B")],
        );
        assert_eq!(stage.option_count(&state), 2);

        state.record_plan(
            PlanKind::Locations,
            (0..5).map(|i| Recommendation::new(format!("L{}", i))).collect(),
        );
        assert_eq!(stage.option_count(&state), 3);
    }

    #[test]
    fn test_render_prompt_sees_state() {
        let stage = choice_stage();
        let mut state = SessionState::new("Oslo", 3);
        state.record_plan(PlanKind::Locations, vec![Recommendation::new("A")]);
        assert_eq!(stage.render_prompt(&state), "1 options");
    }

    #[test]
    fn test_debug_omits_prompt() {
        let debug = format!("{:?}", choice_stage());
        assert!(debug.contains("location"));
        assert!(debug.contains("NumericMean"));
    }
}
