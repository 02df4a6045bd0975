//! Values a stage resolves to

use crate::quorum::ConfirmationResult;
use serde::{Deserialize, Serialize};

/// Group spending level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    #[default]
    Medium,
    High,
}

impl BudgetTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Medium => "medium",
            BudgetTier::High => "high",
        }
    }
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single resolved preference a stage produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolvedValue {
    /// 0-based option index
    Choice { index: usize, defaulted: bool },
    Preferences { items: Vec<String>, defaulted: bool },
    Budget { tier: BudgetTier },
    Confirmation {
        confirmed: bool,
        yes_count: usize,
        required: usize,
    },
}

impl ResolvedValue {
    /// Whether the stage fell back to its default
    pub fn is_default(&self) -> bool {
        match self {
            ResolvedValue::Choice { defaulted, .. } => *defaulted,
            ResolvedValue::Preferences { defaulted, .. } => *defaulted,
            ResolvedValue::Budget { .. } | ResolvedValue::Confirmation { .. } => false,
        }
    }

    pub fn as_choice(&self) -> Option<usize> {
        match self {
            ResolvedValue::Choice { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn as_preferences(&self) -> Option<&[String]> {
        match self {
            ResolvedValue::Preferences { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn as_budget(&self) -> Option<BudgetTier> {
        match self {
            ResolvedValue::Budget { tier } => Some(*tier),
            _ => None,
        }
    }

    pub fn as_confirmed(&self) -> Option<bool> {
        match self {
            ResolvedValue::Confirmation { confirmed, .. } => Some(*confirmed),
            _ => None,
        }
    }
}

impl From<&ConfirmationResult> for ResolvedValue {
    fn from(result: &ConfirmationResult) -> Self {
        ResolvedValue::Confirmation {
            confirmed: result.confirmed,
            yes_count: result.yes_count,
            required: result.required,
        }
    }
}

impl std::fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedValue::Choice { index, .. } => write!(f, "option {}", index + 1),
            ResolvedValue::Preferences { items, .. } => write!(f, "{}", items.join(", ")),
            ResolvedValue::Budget { tier } => write!(f, "{} budget", tier),
            ResolvedValue::Confirmation {
                confirmed,
                yes_count,
                required,
            } => {
                let verdict = if *confirmed { "confirmed" } else { "not confirmed" };
                write!(f, "{} ({}/{} yes)", verdict, yes_count, required)
            }
        }
    }
}
