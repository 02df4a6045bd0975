//! Aggregation policies: from a stage's replies to one resolved value.
//!
//! Invalid replies are discarded one by one; a stage only falls back to its
//! default when nothing valid is left.

use super::value::{BudgetTier, ResolvedValue};
use crate::collection::ResponseSet;
use crate::quorum::{ConfirmationResult, QuorumRule, parse_choice};
use serde::{Deserialize, Serialize};

/// How a stage turns its [`ResponseSet`] into a [`ResolvedValue`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Mean of all valid numeric picks, rounded
    NumericMean { max_options: usize },
    /// Earliest valid numeric pick
    FirstValidChoice { max_options: usize },
    /// Raw reply texts, verbatim
    FreeTextList { default: Vec<String> },
    /// "high" beats "low" beats medium
    BudgetTier,
    /// Yes/no vote over the whole roster
    Confirmation { rule: QuorumRule },
}

/// Inputs an aggregation needs besides the replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationContext {
    /// Options actually on offer for choice stages
    pub option_count: usize,
    pub roster_size: usize,
}

impl AggregationPolicy {
    /// Whether this policy picks among numbered options
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            AggregationPolicy::NumericMean { .. } | AggregationPolicy::FirstValidChoice { .. }
        )
    }

    /// Upper bound on the options a choice stage offers
    pub fn max_options(&self) -> Option<usize> {
        match self {
            AggregationPolicy::NumericMean { max_options }
            | AggregationPolicy::FirstValidChoice { max_options } => Some(*max_options),
            _ => None,
        }
    }

    /// The value used when no reply is usable
    pub fn default_value(&self, roster_size: usize) -> ResolvedValue {
        match self {
            AggregationPolicy::NumericMean { .. } | AggregationPolicy::FirstValidChoice { .. } => {
                ResolvedValue::Choice {
                    index: 0,
                    defaulted: true,
                }
            }
            AggregationPolicy::FreeTextList { default } => ResolvedValue::Preferences {
                items: default.clone(),
                defaulted: true,
            },
            AggregationPolicy::BudgetTier => ResolvedValue::Budget {
                tier: BudgetTier::Medium,
            },
            AggregationPolicy::Confirmation { rule } => ResolvedValue::Confirmation {
                confirmed: rule.min_required(roster_size) == 0,
                yes_count: 0,
                required: rule.min_required(roster_size),
            },
        }
    }

    pub fn aggregate(&self, responses: &ResponseSet, ctx: AggregationContext) -> ResolvedValue {
        let resolved = match self {
            AggregationPolicy::NumericMean { .. } => {
                numeric_mean_choice(responses.texts(), ctx.option_count)
                    .map(|index| ResolvedValue::Choice {
                        index,
                        defaulted: false,
                    })
            }
            AggregationPolicy::FirstValidChoice { .. } => {
                first_valid_choice(responses.texts(), ctx.option_count)
                    .map(|index| ResolvedValue::Choice {
                        index,
                        defaulted: false,
                    })
            }
            AggregationPolicy::FreeTextList { .. } => {
                let items = preference_list(responses.texts());
                (!items.is_empty()).then_some(ResolvedValue::Preferences {
                    items,
                    defaulted: false,
                })
            }
            AggregationPolicy::BudgetTier => Some(ResolvedValue::Budget {
                tier: classify_budget(responses.texts()),
            }),
            AggregationPolicy::Confirmation { rule } => Some(ResolvedValue::from(
                &ConfirmationResult::from_responses(responses, ctx.roster_size, rule),
            )),
        };

        resolved.unwrap_or_else(|| self.default_value(ctx.roster_size))
    }
}

/// `round(mean(valid picks)) - 1`, or `None` when no pick is valid.
///
/// Halves round away from zero (1.5 → 2).
pub fn numeric_mean_choice<'a>(
    replies: impl IntoIterator<Item = &'a str>,
    option_count: usize,
) -> Option<usize> {
    let valid: Vec<usize> = replies
        .into_iter()
        .filter_map(|reply| parse_choice(reply, option_count))
        .collect();

    if valid.is_empty() {
        return None;
    }

    let mean = valid.iter().sum::<usize>() as f64 / valid.len() as f64;
    Some((mean.round() as usize).saturating_sub(1))
}

/// 0-based index of the earliest valid pick.
pub fn first_valid_choice<'a>(
    replies: impl IntoIterator<Item = &'a str>,
    option_count: usize,
) -> Option<usize> {
    replies
        .into_iter()
        .find_map(|reply| parse_choice(reply, option_count))
        .map(|value| value - 1)
}

/// Raw reply texts in arrival order.
pub fn preference_list<'a>(replies: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    replies.into_iter().map(str::to_string).collect()
}

/// Any "high" wins, then any "low", else medium.
pub fn classify_budget<'a>(replies: impl IntoIterator<Item = &'a str>) -> BudgetTier {
    let lowered: Vec<String> = replies.into_iter().map(str::to_lowercase).collect();

    if lowered.iter().any(|r| r.contains("high")) {
        BudgetTier::High
    } else if lowered.iter().any(|r| r.contains("low")) {
        BudgetTier::Low
    } else {
        BudgetTier::Medium
    }
}
