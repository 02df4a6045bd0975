//! Collect Responses use case
//!
//! Posts one prompt to the group channel and gathers the first reply of
//! each participant until enough have answered or the deadline passes.

use crate::ports::channel::{ChannelError, ChannelId, MessageChannel, SubscriptionGuard};
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use crate::ports::session_logger::{NoSessionLogger, SessionEvent, SessionLogger};
use huddle_domain::{Response, ResponseSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Gathers replies to a prompt on one channel
///
/// Cheap to clone; clones share the channel and logger.
#[derive(Clone)]
pub struct ResponseCollector {
    channel: Arc<dyn MessageChannel>,
    channel_id: ChannelId,
    logger: Arc<dyn SessionLogger>,
}

impl ResponseCollector {
    pub fn new(channel: Arc<dyn MessageChannel>, channel_id: ChannelId) -> Self {
        Self {
            channel,
            channel_id,
            logger: Arc::new(NoSessionLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    /// Post a message without collecting replies
    pub async fn send(&self, text: &str) -> Result<(), ChannelError> {
        self.channel.send(&self.channel_id, text).await
    }

    /// Collect with default (no-op) progress
    pub async fn collect(
        &self,
        prompt: &str,
        timeout: Duration,
        min_responses: usize,
    ) -> Result<ResponseSet, ChannelError> {
        self.collect_with_progress(prompt, timeout, min_responses, &NoProgress)
            .await
    }

    /// Send `prompt` once, then record the first message of each sender
    ///
    /// Returns as soon as `min_responses` distinct senders replied, or when
    /// `timeout` elapses. Running out of time is not an error.
    pub async fn collect_with_progress(
        &self,
        prompt: &str,
        timeout: Duration,
        min_responses: usize,
        progress: &dyn StageProgressNotifier,
    ) -> Result<ResponseSet, ChannelError> {
        // Subscribe first so a reply racing the prompt is not lost
        let mut subscription = self.channel.subscribe(&self.channel_id).await?;
        let _guard = SubscriptionGuard::new(self.channel.as_ref(), subscription.id);

        self.channel.send(&self.channel_id, prompt).await?;

        let deadline = Instant::now() + timeout;
        let mut responses = ResponseSet::new(min_responses, timeout);

        // One timer for the whole collection, polled ahead of the queue so a
        // steady stream of messages cannot starve it
        let expired = tokio::time::sleep_until(deadline);
        tokio::pin!(expired);

        while !responses.is_satisfied() {
            if Instant::now() >= deadline {
                Self::log_timeout(&responses, min_responses);
                break;
            }

            tokio::select! {
                biased;

                _ = &mut expired => {
                    Self::log_timeout(&responses, min_responses);
                    break;
                }
                message = subscription.receiver.recv() => {
                    let Some(message) = message else {
                        warn!("Subscription on {} closed before collection finished", self.channel_id);
                        break;
                    };
                    if message.is_self {
                        continue;
                    }

                    let sender = message.sender.clone();
                    let recorded = responses.record(Response::received_at(
                        message.sender,
                        message.text,
                        message.received_at,
                    ));
                    if !recorded {
                        debug!("Ignoring repeat message from {}", sender);
                        continue;
                    }

                    debug!("Recorded reply from {} ({}/{})", sender, responses.len(), min_responses);
                    progress.on_response(&sender, responses.len(), min_responses);
                    if let Some(response) = responses.get(&sender) {
                        self.logger.log(SessionEvent::new(
                            "response_recorded",
                            serde_json::json!({
                                "sender": sender.as_str(),
                                "text": response.text,
                            }),
                        ));
                    }
                }
            }
        }

        Ok(responses)
    }

    fn log_timeout(responses: &ResponseSet, min_responses: usize) {
        info!(
            "Collection timed out with {}/{} replies",
            responses.len(),
            min_responses
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::channel::InboundMessage;
    use crate::use_cases::test_support::{MockChannel, reply};
    use huddle_domain::Participant;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn collector(channel: &Arc<MockChannel>) -> ResponseCollector {
        ResponseCollector::new(channel.clone(), ChannelId::new("C-test"))
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_message_per_sender_wins() {
        let channel = Arc::new(MockChannel::new(vec![vec![
            reply(1, "alice", "3"),
            reply(2, "alice", "1"),
            reply(3, "bob", "2"),
        ]]));

        let responses = collector(&channel)
            .collect("Pick one", Duration::from_secs(60), 2)
            .await
            .unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(
            responses.get(&Participant::new("alice")).unwrap().text,
            "3"
        );
        assert_eq!(responses.get(&Participant::new("bob")).unwrap().text, "2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_early_once_minimum_reached() {
        let channel = Arc::new(MockChannel::new(vec![vec![
            reply(1, "alice", "yes"),
            reply(2, "bob", "yes"),
            reply(50, "carol", "yes"),
        ]]));

        let started = Instant::now();
        let responses = collector(&channel)
            .collect("Ready?", Duration::from_secs(100), 2)
            .await
            .unwrap();

        assert_eq!(responses.len(), 2);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_with_partial_replies_is_not_an_error() {
        let channel = Arc::new(MockChannel::new(vec![vec![reply(5, "alice", "park")]]));

        let started = Instant::now();
        let responses = collector(&channel)
            .collect("Ideas?", Duration::from_secs(30), 4)
            .await
            .unwrap();

        assert_eq!(responses.len(), 1);
        assert!(!responses.is_satisfied());
        assert!(started.elapsed() >= Duration::from_secs(30));
        assert!(started.elapsed() < Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_replies_times_out_empty() {
        let channel = Arc::new(MockChannel::new(vec![]));

        let responses = collector(&channel)
            .collect("Anyone?", Duration::from_secs(10), 1)
            .await
            .unwrap();

        assert!(responses.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_sent_exactly_once_and_echo_ignored() {
        let channel = Arc::new(
            MockChannel::new(vec![vec![reply(1, "alice", "hi")]]).with_echo(),
        );

        let responses = collector(&channel)
            .collect("Hello group", Duration::from_secs(10), 1)
            .await
            .unwrap();

        assert_eq!(channel.sent(), vec!["Hello group".to_string()]);
        assert_eq!(responses.len(), 1);
        assert!(!responses.contains(&Participant::new("huddle")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribes_on_every_return_path() {
        let channel = Arc::new(MockChannel::new(vec![vec![reply(1, "alice", "ok")]]));
        let collector = collector(&channel);

        collector
            .collect("first", Duration::from_secs(10), 1)
            .await
            .unwrap();
        collector
            .collect("second", Duration::from_secs(10), 1)
            .await
            .unwrap();

        assert_eq!(channel.unsubscribed().len(), 2);
        assert_eq!(channel.active_subscriptions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_failure_is_surfaced_and_releases_subscription() {
        let channel = Arc::new(MockChannel::new(vec![]).failing_on_send(1));

        let result = collector(&channel)
            .collect("Ping", Duration::from_secs(10), 1)
            .await;

        assert!(matches!(result, Err(ChannelError::SendFailed(_))));
        assert_eq!(channel.active_subscriptions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_replies_do_not_leak_into_next_collection() {
        let channel = Arc::new(MockChannel::new(vec![
            vec![reply(0, "alice", "1"), reply(0, "bob", "2")],
            vec![reply(3, "carol", "3")],
        ]));
        let collector = collector(&channel);

        let first = collector
            .collect("first", Duration::from_secs(10), 1)
            .await
            .unwrap();
        let second = collector
            .collect("second", Duration::from_secs(10), 3)
            .await
            .unwrap();

        assert_eq!(first.len(), 1);
        assert!(first.contains(&Participant::new("alice")));
        assert_eq!(second.len(), 1);
        assert!(second.contains(&Participant::new("carol")));
        assert!(!second.contains(&Participant::new("bob")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_sender_answers_each_collection_separately() {
        let channel = Arc::new(MockChannel::new(vec![
            vec![
                reply(0, "alice", "outdoor"),
                reply(0, "alice", "and museums"),
                reply(0, "alice", "also food"),
            ],
            vec![reply(2, "alice", "low")],
        ]));
        let collector = collector(&channel);

        let first = collector
            .collect("Preferences?", Duration::from_secs(10), 1)
            .await
            .unwrap();
        let second = collector
            .collect("Budget?", Duration::from_secs(10), 1)
            .await
            .unwrap();

        let alice = Participant::new("alice");
        assert_eq!(first.get(&alice).unwrap().text, "outdoor");
        assert_eq!(second.len(), 1);
        assert_eq!(second.get(&alice).unwrap().text, "low");
    }

    #[tokio::test]
    async fn test_repeat_flood_cannot_hold_collection_past_deadline() {
        let channel = Arc::new(MockChannel::new(vec![]));
        let stop = Arc::new(AtomicBool::new(false));
        let flooder = {
            let channel = channel.clone();
            let stop = stop.clone();
            std::thread::spawn(move || {
                while !stop.load(Ordering::SeqCst) {
                    channel.inject(InboundMessage::from_participant("alice", "again"));
                    std::thread::yield_now();
                }
            })
        };

        let started = std::time::Instant::now();
        let result = tokio::time::timeout(
            Duration::from_secs(3),
            collector(&channel).collect("Pick", Duration::from_millis(200), 2),
        )
        .await;
        stop.store(true, Ordering::SeqCst);
        flooder.join().unwrap();

        let responses = result.expect("collection overran its deadline").unwrap();
        assert_eq!(responses.len(), 1);
        assert!(!responses.is_satisfied());
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
