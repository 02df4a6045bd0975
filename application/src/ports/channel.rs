//! Message channel port
//!
//! Defines the interface to the group chat transport. The core never
//! interprets channel-specific addressing: a [`ChannelId`] is opaque.
//!
//! # Subscriptions
//!
//! ```text
//! transport ──(event)──► mpsc::UnboundedSender ──► Subscription.receiver ──► active ResponseSet
//!                                                   (single reader)
//! ```
//!
//! Every inbound event reaches the collector through the subscription's
//! queue, so exactly one task ever writes to the active response set.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use huddle_domain::Participant;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during channel operations
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Subscribe failed: {0}")]
    SubscribeFailed(String),

    #[error("Channel closed")]
    Closed,
}

/// Opaque identifier of a group channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        ChannelId::new(s)
    }
}

/// A message observed on a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender: Participant,
    pub text: String,
    /// Authored by this system (e.g. an echo of our own prompt)
    pub is_self: bool,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn from_participant(sender: impl Into<Participant>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            is_self: false,
            received_at: Utc::now(),
        }
    }

    pub fn from_self(sender: impl Into<Participant>, text: impl Into<String>) -> Self {
        Self {
            is_self: true,
            ..Self::from_participant(sender, text)
        }
    }
}

/// Handle identifying one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// An open subscription: its handle plus the queue of inbound messages
pub struct Subscription {
    pub id: SubscriptionId,
    pub receiver: mpsc::UnboundedReceiver<InboundMessage>,
}

/// Group chat transport
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Post a message to the channel
    async fn send(&self, channel: &ChannelId, text: &str) -> Result<(), ChannelError>;

    /// Start receiving messages posted to the channel
    async fn subscribe(&self, channel: &ChannelId) -> Result<Subscription, ChannelError>;

    /// Stop delivering to a subscription; unknown ids are ignored
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Unsubscribes when dropped, so every exit path releases the subscription
pub(crate) struct SubscriptionGuard<'a> {
    channel: &'a dyn MessageChannel,
    id: SubscriptionId,
}

impl<'a> SubscriptionGuard<'a> {
    pub(crate) fn new(channel: &'a dyn MessageChannel, id: SubscriptionId) -> Self {
        Self { channel, id }
    }
}

impl Drop for SubscriptionGuard<'_> {
    fn drop(&mut self) {
        self.channel.unsubscribe(self.id);
    }
}
