//! Vote types for group confirmation
//!
//! A [`Vote`] is one participant's parsed yes/no reply; a
//! [`ConfirmationResult`] aggregates them against the roster.

use super::parsing::parse_affirmative;
use super::rule::QuorumRule;
use crate::collection::ResponseSet;
use crate::core::participant::Participant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single participant's vote
///
/// # Example
///
/// ```
/// use huddle_domain::Vote;
///
/// assert!(Vote::from_reply("alice", "yes please").approved);
/// assert!(!Vote::from_reply("bob", "not for me").approved);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub participant: Participant,
    pub approved: bool,
    /// The raw reply the vote was parsed from
    pub reply: String,
}

impl Vote {
    pub fn from_reply(participant: impl Into<Participant>, reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self {
            participant: participant.into(),
            approved: parse_affirmative(&reply),
            reply,
        }
    }
}

/// Outcome of a group confirmation
///
/// `confirmed` compares the yes count with the rule's requirement for the
/// **whole roster**. Participants who stayed silent are dissent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationResult {
    pub confirmed: bool,
    pub yes_count: usize,
    pub roster_size: usize,
    /// Yes votes needed for confirmation
    pub required: usize,
    /// Votes in arrival order
    pub votes: Vec<Vote>,
}

impl ConfirmationResult {
    pub fn from_votes(votes: Vec<Vote>, roster_size: usize, rule: &QuorumRule) -> Self {
        let yes_count = votes.iter().filter(|v| v.approved).count();
        let required = rule.min_required(roster_size);

        Self {
            confirmed: yes_count >= required,
            yes_count,
            roster_size,
            required,
            votes,
        }
    }

    pub fn from_responses(responses: &ResponseSet, roster_size: usize, rule: &QuorumRule) -> Self {
        let votes = responses
            .iter()
            .map(|r| Vote::from_reply(r.sender.clone(), r.text.clone()))
            .collect();
        Self::from_votes(votes, roster_size, rule)
    }

    /// Per-participant decisions of those who replied
    pub fn responses(&self) -> BTreeMap<Participant, bool> {
        self.votes
            .iter()
            .map(|v| (v.participant.clone(), v.approved))
            .collect()
    }

    /// Roster members who did not vote
    pub fn silent_count(&self) -> usize {
        self.roster_size.saturating_sub(self.votes.len())
    }

    /// Visual vote summary: ● yes, ○ no, · silent (e.g. "[●○··]")
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for vote in &self.votes {
            summary.push(if vote.approved { '●' } else { '○' });
        }
        for _ in 0..self.silent_count() {
            summary.push('·');
        }
        summary.push(']');
        summary
    }
}
