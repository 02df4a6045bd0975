//! Participant and roster value objects

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A participant in a group session (Value Object)
///
/// This is the sender identity exactly as reported by the message channel.
/// Two participants are equal only when their identity strings match exactly;
/// no case folding or trimming is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Participant {
    fn from(s: &str) -> Self {
        Participant::new(s)
    }
}

impl From<String> for Participant {
    fn from(s: String) -> Self {
        Participant::new(s)
    }
}

/// The fixed, ordered set of participants expected in a session
///
/// A roster is built once and never mutated. Duplicate identities in the
/// input are collapsed, keeping the first occurrence's position.
///
/// # Example
///
/// ```
/// use huddle_domain::Roster;
///
/// let roster = Roster::new(["alice", "bob", "alice", "carol"]);
/// assert_eq!(roster.len(), 3);
/// assert!(roster.contains(&"bob".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Participant>", into = "Vec<Participant>")]
pub struct Roster {
    members: Vec<Participant>,
}

impl Roster {
    pub fn new<I, P>(members: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Participant>,
    {
        let mut seen = HashSet::new();
        let members = members
            .into_iter()
            .map(Into::into)
            .filter(|p: &Participant| seen.insert(p.clone()))
            .collect();
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, participant: &Participant) -> bool {
        self.members.contains(participant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Participant] {
        &self.members
    }
}

impl From<Vec<Participant>> for Roster {
    fn from(members: Vec<Participant>) -> Self {
        Roster::new(members)
    }
}

impl From<Roster> for Vec<Participant> {
    fn from(roster: Roster) -> Self {
        roster.members
    }
}

impl std::fmt::Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.members.iter().map(Participant::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}
