//! Per-stage response collection types

use crate::core::participant::Participant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// A single reply from a participant during one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub sender: Participant,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl Response {
    pub fn new(sender: impl Into<Participant>, text: impl Into<String>) -> Self {
        Self::received_at(sender, text, Utc::now())
    }

    pub fn received_at(
        sender: impl Into<Participant>,
        text: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            received_at,
        }
    }
}

/// The deduplicated set of replies collected for one stage
///
/// Holds at most one [`Response`] per [`Participant`]: the first message
/// from a sender is kept for the lifetime of the stage and any later message
/// from the same sender is discarded. Arrival order is preserved.
///
/// # Example
///
/// ```
/// use huddle_domain::{Response, ResponseSet};
/// use std::time::Duration;
///
/// let mut set = ResponseSet::new(2, Duration::from_secs(30));
/// assert!(set.record(Response::new("alice", "2")));
/// assert!(!set.record(Response::new("alice", "3"))); // duplicate sender
/// assert!(!set.is_satisfied());
///
/// set.record(Response::new("bob", "1"));
/// assert!(set.is_satisfied());
/// assert_eq!(set.get(&"alice".into()).unwrap().text, "2");
/// ```
#[derive(Debug, Clone)]
pub struct ResponseSet {
    expected_minimum: usize,
    timeout: Duration,
    responses: Vec<Response>,
    senders: HashSet<Participant>,
}

impl ResponseSet {
    pub fn new(expected_minimum: usize, timeout: Duration) -> Self {
        Self {
            expected_minimum,
            timeout,
            responses: Vec::new(),
            senders: HashSet::new(),
        }
    }

    /// Record a response unless its sender already answered this stage.
    ///
    /// Returns `true` when the response was kept.
    pub fn record(&mut self, response: Response) -> bool {
        if !self.senders.insert(response.sender.clone()) {
            return false;
        }
        self.responses.push(response);
        true
    }

    /// Whether the minimum response threshold has been met
    pub fn is_satisfied(&self) -> bool {
        self.responses.len() >= self.expected_minimum
    }

    pub fn get(&self, sender: &Participant) -> Option<&Response> {
        self.responses.iter().find(|r| &r.sender == sender)
    }

    pub fn contains(&self, sender: &Participant) -> bool {
        self.senders.contains(sender)
    }

    /// Responses in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &Response> {
        self.responses.iter()
    }

    /// Reply texts in arrival order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.responses.iter().map(|r| r.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn expected_minimum(&self) -> usize {
        self.expected_minimum
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn into_responses(self) -> Vec<Response> {
        self.responses
    }
}
