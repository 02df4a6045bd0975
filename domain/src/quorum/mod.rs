//! Quorum decision domain
//!
//! Rules and reply parsing used when the group has to agree on something:
//! yes/no confirmations and numbered choices.
//!
//! # Roster denominator
//!
//! ```text
//! roster: [a, b, c, d]      replies: a=yes, b=no      (c, d silent)
//!
//!   required = ceil(4 / 2) = 2
//!   yes      = 1            → not confirmed
//! ```
//!
//! Silent members are never dropped from the denominator.

pub mod parsing;
pub mod rule;
pub mod vote;

// Re-export main types
pub use parsing::{parse_affirmative, parse_choice};
pub use rule::{QuorumRule, required_for_fraction};
pub use vote::{ConfirmationResult, Vote};
