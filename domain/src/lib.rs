//! Domain layer for huddle
//!
//! This crate contains the core decision rules, entities, and value objects.
//! It has no dependencies on async runtimes, transports, or presentation.
//!
//! # Core Concepts
//!
//! ## Stage pipeline
//!
//! A session asks the group a fixed sequence of questions. Each
//! [`StageDefinition`] collects one [`ResponseSet`] (at most one reply per
//! participant) and an [`AggregationPolicy`] reduces it to a single
//! [`ResolvedValue`] that later stages can build on.
//!
//! ## Quorum
//!
//! - **Connection quorum**: enough roster members finished the external
//!   authorization handshake ([`QuorumOutcome`]).
//! - **Confirmation**: yes votes measured against the whole roster
//!   ([`ConfirmationResult`], [`QuorumRule`]).

pub mod collection;
pub mod config;
pub mod connection;
pub mod core;
pub mod plan;
pub mod prompt;
pub mod quorum;
pub mod session;
pub mod stage;

// Re-export commonly used types
pub use collection::{Response, ResponseSet};
pub use config::OutputFormat;
pub use connection::{
    ClaimedIdentity, ConnectionRecord, ConnectionState, Credential, QuorumOutcome, QuorumWait,
};
pub use crate::core::{
    error::DomainError,
    participant::{Participant, Roster},
};
pub use plan::{PlanKind, PlanRequest, Recommendation, canonical, parse_recommendations};
pub use prompt::PromptTemplate;
pub use quorum::{
    ConfirmationResult, QuorumRule, Vote, parse_affirmative, parse_choice, required_for_fraction,
};
pub use session::{SessionArtifact, SessionState};
pub use stage::{
    AggregationContext, AggregationPolicy, BudgetTier, PromptFn, ResolvedValue, StageDefinition,
    StageId,
};
