//! Pipeline stages: definitions, aggregation policies and resolved values

pub mod aggregation;
pub mod definition;
pub mod value;

pub use aggregation::{
    AggregationContext, AggregationPolicy, classify_budget, first_valid_choice,
    numeric_mean_choice, preference_list,
};
pub use definition::{PromptFn, StageDefinition, StageId};
pub use value::{BudgetTier, ResolvedValue};
