//! Terminal states of a connection quorum wait

use super::record::ConnectionRecord;
use serde::{Deserialize, Serialize};

/// How a quorum wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuorumOutcome {
    /// Enough roster members connected before the deadline
    QuorumReached,
    /// Deadline elapsed with some, but not enough, connections
    TimedOutPartial,
    /// Deadline elapsed with no connections at all
    TimedOutEmpty,
}

impl QuorumOutcome {
    pub fn is_reached(&self) -> bool {
        matches!(self, QuorumOutcome::QuorumReached)
    }

    pub fn is_timed_out(&self) -> bool {
        !self.is_reached()
    }

    /// Classify a finished wait from the connected and required counts
    pub fn classify(connected: usize, required: usize) -> Self {
        if connected >= required {
            QuorumOutcome::QuorumReached
        } else if connected == 0 {
            QuorumOutcome::TimedOutEmpty
        } else {
            QuorumOutcome::TimedOutPartial
        }
    }
}

impl std::fmt::Display for QuorumOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuorumOutcome::QuorumReached => write!(f, "Quorum reached"),
            QuorumOutcome::TimedOutPartial => write!(f, "Timed out (partial)"),
            QuorumOutcome::TimedOutEmpty => write!(f, "Timed out (no connections)"),
        }
    }
}

/// Result of waiting for a connection quorum
///
/// Partial results are valid: callers proceed with whoever connected.
#[derive(Debug, Clone)]
pub struct QuorumWait {
    pub outcome: QuorumOutcome,
    /// Connections required for quorum
    pub required: usize,
    /// Connected roster members, in roster order
    pub connected: Vec<ConnectionRecord>,
}

impl QuorumWait {
    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }
}
