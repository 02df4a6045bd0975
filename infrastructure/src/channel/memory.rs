//! In-process channel hub.
//!
//! [`InMemoryChannel`] keeps a routing table of subscriptions per channel and
//! fans every published message out to them through `mpsc` queues. It backs
//! the console driver and integration tests; a chat-platform adapter would
//! implement the same port over its own event stream.
//!
//! Outbound messages are echoed back to subscribers flagged `is_self`, the
//! way chat platforms deliver a bot's own posts.

use async_trait::async_trait;
use huddle_application::ports::channel::{
    ChannelError, ChannelId, InboundMessage, MessageChannel, Subscription, SubscriptionId,
};
use huddle_domain::Participant;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// A message posted by this system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub channel: ChannelId,
    pub text: String,
}

struct Route {
    channel: ChannelId,
    tx: mpsc::UnboundedSender<InboundMessage>,
}

pub struct InMemoryChannel {
    /// Sender name used for echoed outbound messages
    bot_name: Participant,
    next_id: AtomicU64,
    routes: RwLock<HashMap<SubscriptionId, Route>>,
    history: Mutex<Vec<OutboundMessage>>,
    outbound: Option<mpsc::UnboundedSender<OutboundMessage>>,
}

impl Default for InMemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChannel {
    pub fn new() -> Self {
        Self {
            bot_name: Participant::new("huddle"),
            next_id: AtomicU64::new(1),
            routes: RwLock::new(HashMap::new()),
            history: Mutex::new(Vec::new()),
            outbound: None,
        }
    }

    /// Also forward every outbound message to the returned receiver
    pub fn with_outbound_listener(mut self) -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.outbound = Some(tx);
        (self, rx)
    }

    pub fn with_bot_name(mut self, name: impl Into<Participant>) -> Self {
        self.bot_name = name.into();
        self
    }

    /// Deliver an inbound message to every subscriber of `channel`
    ///
    /// Returns how many subscriptions received it.
    pub fn publish(&self, channel: &ChannelId, message: InboundMessage) -> usize {
        let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
        let mut delivered = 0;
        for route in routes.values().filter(|r| &r.channel == channel) {
            if route.tx.send(message.clone()).is_ok() {
                delivered += 1;
            }
        }
        trace!(
            "Published message from {} on {} to {} subscriptions",
            message.sender, channel, delivered
        );
        delivered
    }

    /// Everything this system has posted to `channel`, oldest first
    pub fn sent_messages(&self, channel: &ChannelId) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|m| &m.channel == channel)
            .map(|m| m.text.clone())
            .collect()
    }

    pub fn subscription_count(&self) -> usize {
        self.routes.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl MessageChannel for InMemoryChannel {
    async fn send(&self, channel: &ChannelId, text: &str) -> Result<(), ChannelError> {
        let message = OutboundMessage {
            channel: channel.clone(),
            text: text.to_string(),
        };

        if let Some(outbound) = &self.outbound {
            outbound
                .send(message.clone())
                .map_err(|_| ChannelError::Closed)?;
        }
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);

        self.publish(
            channel,
            InboundMessage::from_self(self.bot_name.clone(), text),
        );
        Ok(())
    }

    async fn subscribe(&self, channel: &ChannelId) -> Result<Subscription, ChannelError> {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, receiver) = mpsc::unbounded_channel();
        self.routes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                id,
                Route {
                    channel: channel.clone(),
                    tx,
                },
            );
        debug!("Subscription {} opened on {}", id.value(), channel);
        Ok(Subscription { id, receiver })
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
        if routes.remove(&id).is_some() {
            debug!("Subscription {} closed", id.value());
        }
    }
}
