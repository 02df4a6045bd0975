//! Message templates for the group channel

use crate::core::participant::{Participant, Roster};
use crate::plan::{PlanKind, Recommendation};
use crate::session::{SessionArtifact, SessionState};

/// Templates for every message the system posts to the group
pub struct PromptTemplate;

impl PromptTemplate {
    /// Opening question for the free-text preference stage
    pub fn preferences_prompt() -> &'static str {
        r#"What are you in the mood for today? Reply with anything you like
(e.g. "outdoor", "museum", "live music"). One reply per person counts."#
    }

    /// Budget tier question
    pub fn budget_prompt() -> &'static str {
        r#"What's your budget for the day? Reply "low", "medium" or "high"."#
    }

    /// Numbered option list, e.g. for locations or restaurants
    pub fn options_prompt(title: &str, options: &[Recommendation], max: usize) -> String {
        if options.is_empty() {
            return format!(
                "{}\nNo suggestions came back, so we'll go with the default. Reply anything to continue.",
                title
            );
        }

        let mut prompt = format!("{}\n", title);
        for (i, option) in options.iter().take(max).enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, option.label()));
        }
        prompt.push_str("Reply with the number of your pick.");
        prompt
    }

    /// Location pick, rendered from the collaborator's location list
    pub fn location_prompt(state: &SessionState, max: usize) -> String {
        Self::options_prompt(
            &format!("Where should we go in {}?", state.city()),
            state.plan(PlanKind::Locations),
            max,
        )
    }

    /// Restaurant pick, rendered from the collaborator's restaurant list
    pub fn restaurant_prompt(state: &SessionState, max: usize) -> String {
        let near = state
            .selection(&"location".into())
            .map(|r| format!(" near {}", r.name))
            .unwrap_or_default();
        Self::options_prompt(
            &format!("Where should we eat{}?", near),
            state.plan(PlanKind::Restaurants),
            max,
        )
    }

    /// Final yes/no question summarising the plan so far
    pub fn confirmation_prompt(state: &SessionState) -> String {
        let mut prompt = format!("Here's the plan for {}:\n", state.city());
        for (stage, verb) in [("location", "Go to"), ("restaurant", "Eat at")] {
            if let Some(selection) = state.selection(&stage.into()) {
                prompt.push_str(&format!("- {} {}\n", verb, selection.label()));
            }
        }
        if let Some(transport) = crate::plan::canonical(state.plan(PlanKind::Transport)) {
            prompt.push_str(&format!("- Get there by {}\n", transport.label()));
        }
        prompt.push_str("Does this work for everyone? Reply yes or no.");
        prompt
    }

    /// Asks the roster to complete the authorization handshake
    pub fn authorization_request(roster: &Roster, required: usize) -> String {
        format!(
            "Before we start, please connect your account ({} of {} needed): {}",
            required,
            roster.len(),
            roster
        )
    }

    /// Running count after each successful authorization
    pub fn connection_progress(participant: &Participant, connected: usize, total: usize) -> String {
        format!("✅ {} connected ({}/{})", participant, connected, total)
    }

    /// Summary of the finished session
    pub fn artifact_summary(artifact: &SessionArtifact) -> String {
        let mut summary = format!("📋 Plan for {} ({} people)\n", artifact.city, artifact.roster.len());

        for (stage, selection) in &artifact.selections {
            summary.push_str(&format!("- {}: {}\n", stage, selection.label()));
        }
        for kind in [PlanKind::Transport, PlanKind::Weather, PlanKind::Insights] {
            if let Some(entry) = artifact.canonical(kind) {
                summary.push_str(&format!("- {}: {}\n", kind, entry.label()));
            }
        }
        if let Some(cost) = artifact.estimated_cost_per_person() {
            summary.push_str(&format!("Estimated cost: ~${:.0} per person\n", cost));
        }

        match artifact.confirmed {
            Some(true) => summary.push_str("The group confirmed the plan. Have fun!"),
            Some(false) => summary.push_str("The plan was not confirmed by enough people."),
            None => summary.push_str("Enjoy!"),
        }
        summary
    }

    /// Single apology posted when a session has to stop
    pub fn apology(reason: &str) -> String {
        format!(
            "Sorry, something went wrong and I have to stop planning ({}). Please start again.",
            reason
        )
    }
}
