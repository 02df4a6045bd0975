//! Port mocks shared by the use case tests

use crate::ports::channel::{
    ChannelError, ChannelId, InboundMessage, MessageChannel, Subscription, SubscriptionId,
};
use crate::ports::planner::{PlannerError, PlanningCollaborator};
use crate::ports::token_exchange::{AuthorizationError, TokenExchange};
use async_trait::async_trait;
use huddle_domain::{Credential, PlanKind, PlanRequest, Recommendation};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

// ==================== MockChannel ====================

type Subscribers = Arc<Mutex<HashMap<SubscriptionId, mpsc::UnboundedSender<InboundMessage>>>>;

/// Replies delivered `delay` after the prompt that triggered them
pub(crate) type Script = Vec<(Duration, InboundMessage)>;

pub(crate) fn reply(delay_secs: u64, sender: &str, text: &str) -> (Duration, InboundMessage) {
    (
        Duration::from_secs(delay_secs),
        InboundMessage::from_participant(sender, text),
    )
}

/// Channel that answers each `send` with the next scripted batch of replies.
///
/// Delayed replies go to whoever is subscribed when they arrive.
pub(crate) struct MockChannel {
    next_id: AtomicU64,
    subscribers: Subscribers,
    scripts: Mutex<VecDeque<Script>>,
    sent: Mutex<Vec<String>>,
    unsubscribed: Mutex<Vec<SubscriptionId>>,
    echo: bool,
    fail_on_send: Option<usize>,
}

impl MockChannel {
    pub(crate) fn new(scripts: Vec<Script>) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            scripts: Mutex::new(scripts.into()),
            sent: Mutex::new(Vec::new()),
            unsubscribed: Mutex::new(Vec::new()),
            echo: false,
            fail_on_send: None,
        }
    }

    /// Deliver every sent message back to subscribers as `is_self`
    pub(crate) fn with_echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Fail the `n`-th send (1-based)
    pub(crate) fn failing_on_send(mut self, n: usize) -> Self {
        self.fail_on_send = Some(n);
        self
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn unsubscribed(&self) -> Vec<SubscriptionId> {
        self.unsubscribed.lock().unwrap().clone()
    }

    pub(crate) fn active_subscriptions(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    /// Deliver a message to current subscribers, outside any script
    pub(crate) fn inject(&self, message: InboundMessage) {
        Self::deliver_now(&self.subscribers, &message);
    }

    fn deliver_now(subscribers: &Subscribers, message: &InboundMessage) {
        for tx in subscribers.lock().unwrap().values() {
            let _ = tx.send(message.clone());
        }
    }
}

#[async_trait]
impl MessageChannel for MockChannel {
    async fn send(&self, _channel: &ChannelId, text: &str) -> Result<(), ChannelError> {
        let attempt = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(text.to_string());
            sent.len()
        };
        if self.fail_on_send == Some(attempt) {
            return Err(ChannelError::SendFailed("mock outage".to_string()));
        }

        if self.echo {
            Self::deliver_now(&self.subscribers, &InboundMessage::from_self("huddle", text));
        }

        let script = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        for (delay, message) in script {
            let subscribers = Arc::clone(&self.subscribers);
            if delay.is_zero() {
                Self::deliver_now(&subscribers, &message);
                continue;
            }
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                Self::deliver_now(&subscribers, &message);
            });
        }
        Ok(())
    }

    async fn subscribe(&self, _channel: &ChannelId) -> Result<Subscription, ChannelError> {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (tx, receiver) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().insert(id, tx);
        Ok(Subscription { id, receiver })
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().unwrap().remove(&id);
        self.unsubscribed.lock().unwrap().push(id);
    }
}

// ==================== MockPlanner ====================

pub(crate) struct MockPlanner {
    plans: HashMap<PlanKind, Vec<Recommendation>>,
    failing: Option<PlanKind>,
    requests: Mutex<Vec<PlanRequest>>,
}

impl MockPlanner {
    pub(crate) fn new() -> Self {
        Self {
            plans: HashMap::new(),
            failing: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_plan(mut self, kind: PlanKind, names: &[&str]) -> Self {
        self.plans.insert(
            kind,
            names.iter().map(|name| Recommendation::new(*name)).collect(),
        );
        self
    }

    pub(crate) fn failing_for(mut self, kind: PlanKind) -> Self {
        self.failing = Some(kind);
        self
    }

    pub(crate) fn requests(&self) -> Vec<PlanRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanningCollaborator for MockPlanner {
    async fn plan(&self, request: &PlanRequest) -> Result<Vec<Recommendation>, PlannerError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing == Some(request.kind) {
            return Err(PlannerError::Malformed("unterminated string".to_string()));
        }
        Ok(self.plans.get(&request.kind).cloned().unwrap_or_default())
    }
}

// ==================== MockExchange ====================

/// Accepts codes of the form `ok-<token>`, rejects everything else
pub(crate) struct MockExchange;

#[async_trait]
impl TokenExchange for MockExchange {
    async fn exchange(&self, code: &str) -> Result<Credential, AuthorizationError> {
        match code.strip_prefix("ok-") {
            Some(token) => Ok(Credential::new(token)),
            None => Err(AuthorizationError::Rejected(format!("invalid code {}", code))),
        }
    }
}
