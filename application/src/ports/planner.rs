//! Planning collaborator port
//!
//! Recommendation content (places, restaurants, transport, weather) is
//! produced outside the core. The core only sends a [`PlanRequest`] and
//! keeps the returned order; it never looks at how the list was ranked.

use async_trait::async_trait;
use huddle_domain::{PlanRequest, Recommendation};
use thiserror::Error;

/// Errors that can occur while asking a collaborator for a plan
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Payload could not be parsed, even after the local repair attempt
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Timeout")]
    Timeout,
}

impl PlannerError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, PlannerError::Malformed(_))
    }
}

/// Pure request/response planning function
///
/// Retries, if any, are the implementation's business; the orchestrator
/// calls each collaborator once per stage.
#[async_trait]
pub trait PlanningCollaborator: Send + Sync {
    async fn plan(&self, request: &PlanRequest) -> Result<Vec<Recommendation>, PlannerError>;
}
