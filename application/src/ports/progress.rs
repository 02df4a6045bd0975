//! Progress notification port
//!
//! Defines the interface for reporting progress while a session runs.

use huddle_domain::{Participant, ResolvedValue, StageId};

/// Callback for progress updates during a session
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain log lines, etc.)
pub trait StageProgressNotifier: Send + Sync {
    /// Called when a stage's prompt is about to be sent
    fn on_stage_start(&self, stage: &StageId, index: usize, total: usize);

    /// Called for every reply recorded into the active response set
    fn on_response(&self, participant: &Participant, received: usize, expected: usize);

    /// Called when a stage resolves to a value
    fn on_stage_complete(&self, stage: &StageId, value: &ResolvedValue);

    /// Called when the connected count changes during a quorum wait
    fn on_quorum_progress(&self, _connected: usize, _required: usize, _total: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl StageProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: &StageId, _index: usize, _total: usize) {}
    fn on_response(&self, _participant: &Participant, _received: usize, _expected: usize) {}
    fn on_stage_complete(&self, _stage: &StageId, _value: &ResolvedValue) {}
}
