//! Application layer for huddle
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod pipeline;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConnectionSettings, PipelineSettings};
pub use pipeline::outing_pipeline;
pub use ports::{
    channel::{ChannelError, ChannelId, InboundMessage, MessageChannel, Subscription, SubscriptionId},
    planner::{PlannerError, PlanningCollaborator},
    progress::{NoProgress, StageProgressNotifier},
    session_logger::{NoSessionLogger, SessionEvent, SessionLogger},
    token_exchange::{AuthorizationError, TokenExchange},
};
pub use use_cases::collect_responses::ResponseCollector;
pub use use_cases::confirm::ConfirmationResolver;
pub use use_cases::connection_quorum::ConnectionQuorumTracker;
pub use use_cases::run_session::{OrchestratorError, StageOrchestrator};
