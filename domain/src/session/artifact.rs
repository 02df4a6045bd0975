//! Final artifact of a completed session

use crate::core::participant::Roster;
use crate::plan::{PlanKind, Recommendation, canonical};
use crate::stage::{ResolvedValue, StageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a finished session decided
///
/// Only produced when every stage completed; a failed session yields no
/// artifact at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionArtifact {
    pub city: String,
    pub roster: Roster,
    pub accumulated: BTreeMap<StageId, ResolvedValue>,
    /// Recommendation picked at each choice stage
    pub selections: BTreeMap<StageId, Recommendation>,
    /// Every collaborator answer, in collaborator order
    pub plans: BTreeMap<PlanKind, Vec<Recommendation>>,
    /// Group confirmation, if the pipeline had a confirmation stage
    pub confirmed: Option<bool>,
}

impl SessionArtifact {
    pub fn selection(&self, stage: &str) -> Option<&Recommendation> {
        self.selections.get(&StageId::new(stage))
    }

    /// Canonical entry of a collaborator answer (best-flagged or first)
    pub fn canonical(&self, kind: PlanKind) -> Option<&Recommendation> {
        self.plans.get(&kind).and_then(|list| canonical(list))
    }

    /// Sum of the per-person cost estimates of all selections
    pub fn estimated_cost_per_person(&self) -> Option<f64> {
        let costs: Vec<f64> = self
            .selections
            .values()
            .filter_map(|r| r.estimated_cost_per_person)
            .collect();
        (!costs.is_empty()).then(|| costs.iter().sum())
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed.unwrap_or(false)
    }
}
