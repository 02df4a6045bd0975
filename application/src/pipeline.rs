//! The default outing-planning pipeline
//!
//! ```text
//! preferences ─► budget ─► location ─► restaurant ─► confirm
//!  free text     tier      mean pick   first valid    yes/no
//!                 │           │            │
//!                 ▼           ▼            ▼
//!             locations  restaurants  transport, weather, insights
//! ```
//!
//! Every stage waits for the whole roster or its timeout, whichever comes
//! first.

use crate::config::PipelineSettings;
use huddle_domain::{AggregationPolicy, PlanKind, PromptTemplate, SessionState, StageDefinition};

pub fn outing_pipeline(settings: &PipelineSettings, roster_size: usize) -> Vec<StageDefinition> {
    let max = settings.max_options;
    let everyone = roster_size.max(1);
    let stage = |definition: StageDefinition| {
        definition
            .with_timeout(settings.stage_timeout)
            .with_min_responses(everyone)
    };

    vec![
        stage(StageDefinition::new(
            "preferences",
            AggregationPolicy::FreeTextList {
                default: settings.default_preferences.clone(),
            },
            |_: &SessionState| PromptTemplate::preferences_prompt().to_string(),
        )),
        stage(
            StageDefinition::new("budget", AggregationPolicy::BudgetTier, |_: &SessionState| {
                PromptTemplate::budget_prompt().to_string()
            })
            .then_plan(PlanKind::Locations),
        ),
        stage(
            StageDefinition::new(
                "location",
                AggregationPolicy::NumericMean { max_options: max },
                move |state: &SessionState| PromptTemplate::location_prompt(state, max),
            )
            .with_choices_from(PlanKind::Locations)
            .then_plan(PlanKind::Restaurants),
        ),
        stage(
            StageDefinition::new(
                "restaurant",
                AggregationPolicy::FirstValidChoice { max_options: max },
                move |state: &SessionState| PromptTemplate::restaurant_prompt(state, max),
            )
            .with_choices_from(PlanKind::Restaurants)
            .then_plan(PlanKind::Transport)
            .then_plan(PlanKind::Weather)
            .then_plan(PlanKind::Insights),
        ),
        StageDefinition::new(
            "confirm",
            AggregationPolicy::Confirmation {
                rule: settings.confirmation_rule,
            },
            PromptTemplate::confirmation_prompt,
        )
        .with_timeout(settings.confirm_timeout)
        .with_min_responses(everyone),
    ]
}
