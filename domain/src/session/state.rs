//! Session state threaded through the stage pipeline

use super::artifact::SessionArtifact;
use crate::core::participant::Roster;
use crate::plan::{PlanKind, PlanRequest, Recommendation};
use crate::stage::{BudgetTier, ResolvedValue, StageId};
use std::collections::BTreeMap;

/// Accumulated state of one running session
///
/// Only the orchestrator mutates this. Every [`resolve`](Self::resolve)
/// advances `stage_index` by one; it never goes back.
#[derive(Debug, Clone)]
pub struct SessionState {
    city: String,
    roster_size: usize,
    stage_index: usize,
    accumulated: BTreeMap<StageId, ResolvedValue>,
    resolution_order: Vec<StageId>,
    plans: BTreeMap<PlanKind, Vec<Recommendation>>,
    selections: BTreeMap<StageId, Recommendation>,
}

impl SessionState {
    pub fn new(city: impl Into<String>, roster_size: usize) -> Self {
        Self {
            city: city.into(),
            roster_size,
            stage_index: 0,
            accumulated: BTreeMap::new(),
            resolution_order: Vec::new(),
            plans: BTreeMap::new(),
            selections: BTreeMap::new(),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn roster_size(&self) -> usize {
        self.roster_size
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    /// Store a stage's resolved value and move to the next stage
    pub fn resolve(&mut self, stage: StageId, value: ResolvedValue) {
        if self.accumulated.insert(stage.clone(), value).is_none() {
            self.resolution_order.push(stage);
        }
        self.stage_index += 1;
    }

    pub fn get(&self, stage: &StageId) -> Option<&ResolvedValue> {
        self.accumulated.get(stage)
    }

    pub fn accumulated(&self) -> &BTreeMap<StageId, ResolvedValue> {
        &self.accumulated
    }

    pub fn record_plan(&mut self, kind: PlanKind, recommendations: Vec<Recommendation>) {
        self.plans.insert(kind, recommendations);
    }

    /// Collaborator results of `kind`, empty when never requested
    pub fn plan(&self, kind: PlanKind) -> &[Recommendation] {
        self.plans.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn select(&mut self, stage: StageId, recommendation: Recommendation) {
        self.selections.insert(stage, recommendation);
    }

    pub fn selection(&self, stage: &StageId) -> Option<&Recommendation> {
        self.selections.get(stage)
    }

    /// Resolved values in the order their stages finished
    fn resolved_in_order(&self) -> impl Iterator<Item = &ResolvedValue> {
        self.resolution_order
            .iter()
            .filter_map(|stage| self.accumulated.get(stage))
    }

    /// The first preference list resolved so far
    pub fn preferences(&self) -> Vec<String> {
        self.resolved_in_order()
            .find_map(|v| v.as_preferences())
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    /// The first budget tier resolved so far, medium otherwise
    pub fn budget(&self) -> BudgetTier {
        self.resolved_in_order()
            .find_map(ResolvedValue::as_budget)
            .unwrap_or_default()
    }

    /// Build a collaborator request from everything decided so far
    pub fn plan_request(&self, kind: PlanKind) -> PlanRequest {
        PlanRequest {
            kind,
            city: self.city.clone(),
            group_size: self.roster_size,
            preferences: self.preferences(),
            budget: self.budget(),
            context: self
                .selections
                .iter()
                .map(|(stage, rec)| (stage.to_string(), rec.name.clone()))
                .collect(),
        }
    }

    pub fn into_artifact(self, roster: &Roster) -> SessionArtifact {
        let confirmed = self.resolved_in_order().find_map(ResolvedValue::as_confirmed);

        SessionArtifact {
            city: self.city,
            roster: roster.clone(),
            accumulated: self.accumulated,
            selections: self.selections,
            plans: self.plans,
            confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_advances_monotonically() {
        let mut state = SessionState::new("Lisbon", 3);
        assert_eq!(state.stage_index(), 0);

        state.resolve(
            "budget".into(),
            ResolvedValue::Budget {
                tier: BudgetTier::Low,
            },
        );
        state.resolve(
            "location".into(),
            ResolvedValue::Choice {
                index: 2,
                defaulted: false,
            },
        );

        assert_eq!(state.stage_index(), 2);
        assert_eq!(state.budget(), BudgetTier::Low);
        assert_eq!(state.get(&"location".into()).unwrap().as_choice(), Some(2));
    }

    #[test]
    fn test_first_resolved_budget_wins_regardless_of_stage_name() {
        let mut state = SessionState::new("Lisbon", 3);
        state.resolve(
            "spend".into(),
            ResolvedValue::Budget {
                tier: BudgetTier::High,
            },
        );
        state.resolve(
            "another_budget".into(),
            ResolvedValue::Budget {
                tier: BudgetTier::Low,
            },
        );

        assert_eq!(state.budget(), BudgetTier::High);
    }

    #[test]
    fn test_plan_request_carries_context() {
        let mut state = SessionState::new("Lisbon", 4);
        state.resolve(
            "preferences".into(),
            ResolvedValue::Preferences {
                items: vec!["beach".to_string()],
                defaulted: false,
            },
        );
        state.select("location".into(), Recommendation::new("Belém"));

        let request = state.plan_request(PlanKind::Restaurants);
        assert_eq!(request.city, "Lisbon");
        assert_eq!(request.group_size, 4);
        assert_eq!(request.preferences, vec!["beach".to_string()]);
        assert_eq!(request.budget, BudgetTier::Medium);
        assert_eq!(request.context["location"], "Belém");
    }

    #[test]
    fn test_missing_plan_is_empty() {
        let state = SessionState::new("Lisbon", 1);
        assert!(state.plan(PlanKind::Weather).is_empty());
    }

    #[test]
    fn test_into_artifact() {
        let mut state = SessionState::new("Lisbon", 2);
        state.resolve(
            "confirm".into(),
            ResolvedValue::Confirmation {
                confirmed: true,
                yes_count: 1,
                required: 1,
            },
        );
        let artifact = state.into_artifact(&Roster::new(["a", "b"]));
        assert_eq!(artifact.confirmed, Some(true));
        assert_eq!(artifact.roster.len(), 2);
    }
}
