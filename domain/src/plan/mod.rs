//! Planning collaborator boundary types and payload parsing

pub mod parser;
pub mod recommendation;

pub use parser::{parse_recommendations, repair_truncated};
pub use recommendation::{PlanKind, PlanRequest, Recommendation, canonical};
