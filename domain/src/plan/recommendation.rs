//! Planning collaborator request/response types

use crate::stage::value::BudgetTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which kind of recommendation a planning collaborator is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Locations,
    Restaurants,
    Transport,
    Weather,
    Insights,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Locations => "locations",
            PlanKind::Restaurants => "restaurants",
            PlanKind::Transport => "transport",
            PlanKind::Weather => "weather",
            PlanKind::Insights => "insights",
        }
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request sent to a planning collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub kind: PlanKind,
    pub city: String,
    pub group_size: usize,
    pub preferences: Vec<String>,
    pub budget: BudgetTier,
    /// Names of earlier selections, keyed by stage id (e.g. `location`)
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

/// One suggestion returned by a planning collaborator
///
/// Collaborators may attach arbitrary extra fields; they are kept in
/// `details` and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    #[serde(default)]
    pub estimated_cost_per_person: Option<f64>,
    /// Marks the collaborator's preferred element
    #[serde(default)]
    pub best: bool,
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Recommendation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            estimated_cost_per_person: None,
            best: false,
            details: BTreeMap::new(),
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.estimated_cost_per_person = Some(cost);
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn marked_best(mut self) -> Self {
        self.best = true;
        self
    }

    /// Short one-line rendering, e.g. "Riverside Park (~$12/person)"
    pub fn label(&self) -> String {
        match self.estimated_cost_per_person {
            Some(cost) => format!("{} (~${:.0}/person)", self.name, cost),
            None => self.name.clone(),
        }
    }
}

/// The canonical element of a collaborator answer: the one flagged `best`,
/// otherwise the first.
pub fn canonical(recommendations: &[Recommendation]) -> Option<&Recommendation> {
    recommendations
        .iter()
        .find(|r| r.best)
        .or_else(|| recommendations.first())
}
