//! Port for the structured session transcript.
//!
//! Defines the [`SessionLogger`] trait for recording what happened during a
//! session (prompts sent, replies recorded, stage values, collaborator
//! results, connections) to a machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the session
//! transcript (JSONL in the infrastructure adapter).

use serde_json::Value;

/// A structured session event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields. The adapter adds the timestamp.
pub struct SessionEvent {
    /// Event type identifier (e.g., "stage_started", "quorum_resolved").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl SessionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging session events.
///
/// `log` is synchronous and infallible; adapters swallow their own write
/// failures.
pub trait SessionLogger: Send + Sync {
    fn log(&self, event: SessionEvent);
}

/// No-op implementation for tests and when the transcript is disabled.
pub struct NoSessionLogger;

impl SessionLogger for NoSessionLogger {
    fn log(&self, _event: SessionEvent) {}
}
