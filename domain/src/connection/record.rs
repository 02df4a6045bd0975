//! Authorization handshake records

use crate::core::participant::Participant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity string supplied by the client during the authorization handshake.
///
/// This value is chosen by whoever opens the authorization page and is
/// **not verified** by the authorization provider. It is only a correlation
/// token that maps a callback to a roster entry; any browser can claim any
/// roster member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimedIdentity(String);

impl ClaimedIdentity {
    pub fn new(claim: impl Into<String>) -> Self {
        Self(claim.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Treat the claim as a participant identity (unverified).
    pub fn into_participant(self) -> Participant {
        Participant::new(self.0)
    }
}

impl std::fmt::Display for ClaimedIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque credential returned by the token exchange
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_in: None,
            scope: None,
        }
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }
}

// Tokens never end up in logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Evidence that a participant completed the authorization handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub participant: Participant,
    pub credential: Credential,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionRecord {
    pub fn new(participant: Participant, credential: Credential) -> Self {
        Self {
            participant,
            credential,
            connected_at: Utc::now(),
        }
    }
}

/// Per-participant authorization state
///
/// `Unconnected → Connected` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Unconnected,
    Connected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}
