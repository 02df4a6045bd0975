//! Connection Quorum use case
//!
//! Tracks which roster members completed the external authorization
//! handshake and lets the session wait until enough of them have.
//!
//! # Waiting
//!
//! ```text
//! record_connection ──► state (Mutex) ──► watch::Sender<usize> (connected ∩ roster)
//!                                                │
//! wait_for_quorum ◄── select! { changed(), sleep_until(deadline) }
//! ```
//!
//! The wait wakes only when the connected count changes or the deadline
//! passes; there is no polling interval.

use crate::ports::channel::{ChannelError, ChannelId, MessageChannel};
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use crate::ports::session_logger::{NoSessionLogger, SessionEvent, SessionLogger};
use crate::ports::token_exchange::TokenExchange;
use huddle_domain::{
    ClaimedIdentity, ConnectionRecord, ConnectionState, Credential, Participant, PromptTemplate,
    QuorumOutcome, QuorumWait, Roster, required_for_fraction,
};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Default)]
struct TrackerState {
    roster: Roster,
    connections: HashMap<Participant, ConnectionRecord>,
}

impl TrackerState {
    fn connected_count(&self) -> usize {
        self.roster
            .iter()
            .filter(|p| self.connections.contains_key(*p))
            .count()
    }

    fn connected_roster(&self) -> Vec<ConnectionRecord> {
        self.roster
            .iter()
            .filter_map(|p| self.connections.get(p).cloned())
            .collect()
    }
}

/// Tracks authorization handshakes for one session
///
/// Shared between the task waiting for quorum and whatever receives
/// authorization callbacks, typically behind an `Arc`.
pub struct ConnectionQuorumTracker {
    channel: Arc<dyn MessageChannel>,
    channel_id: ChannelId,
    exchange: Arc<dyn TokenExchange>,
    logger: Arc<dyn SessionLogger>,
    state: Mutex<TrackerState>,
    connected_tx: watch::Sender<usize>,
}

impl ConnectionQuorumTracker {
    pub fn new(
        channel: Arc<dyn MessageChannel>,
        channel_id: ChannelId,
        exchange: Arc<dyn TokenExchange>,
    ) -> Self {
        let (connected_tx, _) = watch::channel(0);
        Self {
            channel,
            channel_id,
            exchange,
            logger: Arc::new(NoSessionLogger),
            state: Mutex::new(TrackerState::default()),
            connected_tx,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.logger = logger;
        self
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the roster whose members count toward quorum
    pub fn register_expected(&self, roster: Roster) {
        let connected = {
            let mut state = self.state();
            state.roster = roster;
            state.connected_count()
        };
        self.connected_tx.send_replace(connected);
    }

    pub fn roster(&self) -> Roster {
        self.state().roster.clone()
    }

    pub fn state_of(&self, participant: &Participant) -> ConnectionState {
        if self.state().connections.contains_key(participant) {
            ConnectionState::Connected
        } else {
            ConnectionState::Unconnected
        }
    }

    /// Connected roster members, in roster order
    pub fn connected(&self) -> Vec<ConnectionRecord> {
        self.state().connected_roster()
    }

    /// Ask the roster to connect their accounts
    pub async fn request_authorization(&self, min_fraction: f64) -> Result<(), ChannelError> {
        let roster = self.roster();
        let required = required_for_fraction(roster.len(), min_fraction);
        self.channel
            .send(
                &self.channel_id,
                &PromptTemplate::authorization_request(&roster, required),
            )
            .await
    }

    /// Store a participant's credential
    ///
    /// Repeated calls replace the credential and keep the original
    /// connection time. The channel hears about each roster member once.
    pub async fn record_connection(&self, participant: Participant, credential: Credential) {
        let (in_roster, newly_connected, connected, total) = {
            let mut state = self.state();
            let in_roster = state.roster.contains(&participant);
            let newly_connected = match state.connections.entry(participant.clone()) {
                Entry::Occupied(mut existing) => {
                    existing.get_mut().credential = credential;
                    false
                }
                Entry::Vacant(slot) => {
                    slot.insert(ConnectionRecord::new(participant.clone(), credential));
                    true
                }
            };
            (
                in_roster,
                newly_connected,
                state.connected_count(),
                state.roster.len(),
            )
        };

        self.logger.log(SessionEvent::new(
            "connection_recorded",
            serde_json::json!({
                "participant": participant.as_str(),
                "in_roster": in_roster,
                "connected": connected,
                "total": total,
            }),
        ));

        if !in_roster {
            warn!(
                "{} connected but is not on the roster; not counted toward quorum",
                participant
            );
            return;
        }
        if !newly_connected {
            debug!("{} reconnected; credential replaced", participant);
            return;
        }

        info!("{} connected ({}/{})", participant, connected, total);
        self.connected_tx.send_replace(connected);

        let notice = PromptTemplate::connection_progress(&participant, connected, total);
        if let Err(e) = self.channel.send(&self.channel_id, &notice).await {
            warn!("Failed to announce connection of {}: {}", participant, e);
        }
    }

    /// Entry point for the authorization callback
    ///
    /// The claimed identity is taken at face value. A failed exchange is
    /// logged and leaves the participant unconnected.
    pub async fn handle_authorization_callback(
        &self,
        claimed: ClaimedIdentity,
        code: &str,
    ) -> ConnectionState {
        let participant = claimed.into_participant();
        match self.exchange.exchange(code).await {
            Ok(credential) => {
                self.record_connection(participant.clone(), credential)
                    .await;
            }
            Err(e) => {
                warn!("Authorization for {} failed: {}", participant, e);
            }
        }
        self.state_of(&participant)
    }

    /// Wait with default (no-op) progress
    pub async fn wait_for_quorum(&self, timeout: Duration, min_fraction: f64) -> QuorumWait {
        self.wait_for_quorum_with_progress(timeout, min_fraction, &NoProgress)
            .await
    }

    /// Wait until `ceil(|roster| × min_fraction)` roster members connected
    /// or `timeout` elapses
    ///
    /// A timeout is a normal outcome; the caller decides whether to go on
    /// with whoever connected.
    pub async fn wait_for_quorum_with_progress(
        &self,
        timeout: Duration,
        min_fraction: f64,
        progress: &dyn StageProgressNotifier,
    ) -> QuorumWait {
        let total = self.roster().len();
        let required = required_for_fraction(total, min_fraction);
        let deadline = Instant::now() + timeout;
        let mut connected_rx = self.connected_tx.subscribe();

        info!(
            "Waiting up to {:?} for {} of {} participants to connect",
            timeout, required, total
        );

        let expired = tokio::time::sleep_until(deadline);
        tokio::pin!(expired);

        loop {
            let connected = *connected_rx.borrow_and_update();
            progress.on_quorum_progress(connected, required, total);
            if connected >= required {
                break;
            }

            tokio::select! {
                biased;

                _ = &mut expired => break,
                changed = connected_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        let connected = self.connected();
        let outcome = QuorumOutcome::classify(connected.len(), required);
        info!(
            "Connection wait finished: {} ({}/{})",
            outcome,
            connected.len(),
            required
        );
        self.logger.log(SessionEvent::new(
            "quorum_resolved",
            serde_json::json!({
                "outcome": outcome,
                "connected": connected.len(),
                "required": required,
                "total": total,
            }),
        ));

        QuorumWait {
            outcome,
            required,
            connected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockChannel, MockExchange};

    const ROSTER: [&str; 4] = ["alice", "bob", "carol", "dave"];

    fn tracker(channel: Arc<MockChannel>) -> Arc<ConnectionQuorumTracker> {
        let tracker =
            ConnectionQuorumTracker::new(channel, ChannelId::new("C-test"), Arc::new(MockExchange));
        tracker.register_expected(Roster::new(ROSTER));
        Arc::new(tracker)
    }

    fn connect_after(tracker: &Arc<ConnectionQuorumTracker>, secs: u64, name: &'static str) {
        let tracker = Arc::clone(tracker);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            tracker
                .record_connection(Participant::new(name), Credential::new("token"))
                .await;
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_any_two_of_four_reach_quorum_early() {
        for (i, first) in ROSTER.iter().enumerate() {
            for second in &ROSTER[i + 1..] {
                let tracker = tracker(Arc::new(MockChannel::new(vec![])));
                connect_after(&tracker, 5, *first);
                connect_after(&tracker, 10, *second);

                let started = Instant::now();
                let wait = tracker
                    .wait_for_quorum(Duration::from_secs(300), 0.5)
                    .await;

                assert_eq!(wait.outcome, QuorumOutcome::QuorumReached);
                assert_eq!(wait.connected_count(), 2);
                assert!(started.elapsed() < Duration::from_secs(11));
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_connections_times_out_empty_at_deadline() {
        let tracker = tracker(Arc::new(MockChannel::new(vec![])));

        let started = Instant::now();
        let wait = tracker.wait_for_quorum(Duration::from_secs(60), 0.5).await;

        assert_eq!(wait.outcome, QuorumOutcome::TimedOutEmpty);
        assert!(wait.connected.is_empty());
        assert_eq!(wait.required, 2);
        assert!(started.elapsed() >= Duration::from_secs(60));
        assert!(started.elapsed() < Duration::from_secs(61));
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_connections_time_out_partial() {
        let tracker = tracker(Arc::new(MockChannel::new(vec![])));
        connect_after(&tracker, 5, "carol");

        let wait = tracker.wait_for_quorum(Duration::from_secs(60), 0.75).await;

        assert_eq!(wait.outcome, QuorumOutcome::TimedOutPartial);
        assert_eq!(wait.required, 3);
        assert_eq!(wait.connected[0].participant, Participant::new("carol"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_roster_connection_never_counts() {
        let channel = Arc::new(MockChannel::new(vec![]));
        let tracker = tracker(channel.clone());
        connect_after(&tracker, 1, "mallory");
        connect_after(&tracker, 2, "eve");
        connect_after(&tracker, 3, "alice");

        let wait = tracker.wait_for_quorum(Duration::from_secs(30), 0.5).await;

        assert_eq!(wait.outcome, QuorumOutcome::TimedOutPartial);
        assert_eq!(wait.connected_count(), 1);
        assert_eq!(
            tracker.state_of(&Participant::new("mallory")),
            ConnectionState::Connected
        );
        assert_eq!(channel.sent(), vec!["✅ alice connected (1/4)".to_string()]);
    }

    #[tokio::test]
    async fn test_record_connection_is_idempotent() {
        let channel = Arc::new(MockChannel::new(vec![]));
        let tracker = tracker(channel.clone());

        tracker
            .record_connection(Participant::new("bob"), Credential::new("first"))
            .await;
        tracker
            .record_connection(Participant::new("bob"), Credential::new("second"))
            .await;

        let connected = tracker.connected();
        assert_eq!(connected.len(), 1);
        assert_eq!(connected[0].credential.access_token, "second");
        assert_eq!(channel.sent(), vec!["✅ bob connected (1/4)".to_string()]);
    }

    #[tokio::test]
    async fn test_announcement_failure_is_not_fatal() {
        let channel = Arc::new(MockChannel::new(vec![]).failing_on_send(1));
        let tracker = tracker(channel);

        tracker
            .record_connection(Participant::new("dave"), Credential::new("t"))
            .await;

        assert!(tracker.state_of(&Participant::new("dave")).is_connected());
    }

    #[tokio::test]
    async fn test_callback_exchanges_code() {
        let tracker = tracker(Arc::new(MockChannel::new(vec![])));

        let state = tracker
            .handle_authorization_callback(ClaimedIdentity::new("alice"), "ok-abc")
            .await;

        assert_eq!(state, ConnectionState::Connected);
        assert_eq!(tracker.connected()[0].credential.access_token, "abc");
    }

    #[tokio::test]
    async fn test_failed_exchange_leaves_participant_unconnected() {
        let tracker = tracker(Arc::new(MockChannel::new(vec![])));

        let state = tracker
            .handle_authorization_callback(ClaimedIdentity::new("bob"), "garbage")
            .await;

        assert_eq!(state, ConnectionState::Unconnected);
        assert!(tracker.connected().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_exchange_does_not_block_others() {
        let tracker = tracker(Arc::new(MockChannel::new(vec![])));
        let callbacks = Arc::clone(&tracker);
        tokio::spawn(async move {
            callbacks
                .handle_authorization_callback(ClaimedIdentity::new("alice"), "bad")
                .await;
            callbacks
                .handle_authorization_callback(ClaimedIdentity::new("bob"), "ok-1")
                .await;
            callbacks
                .handle_authorization_callback(ClaimedIdentity::new("carol"), "ok-2")
                .await;
        });

        let wait = tracker.wait_for_quorum(Duration::from_secs(60), 0.5).await;

        assert!(wait.outcome.is_reached());
        assert_eq!(
            wait.connected
                .iter()
                .map(|r| r.participant.as_str())
                .collect::<Vec<_>>(),
            vec!["bob", "carol"]
        );
    }

    #[tokio::test]
    async fn test_empty_roster_reaches_quorum_immediately() {
        let tracker = ConnectionQuorumTracker::new(
            Arc::new(MockChannel::new(vec![])),
            ChannelId::new("C-test"),
            Arc::new(MockExchange),
        );

        let wait = tracker.wait_for_quorum(Duration::from_secs(60), 0.5).await;

        assert_eq!(wait.outcome, QuorumOutcome::QuorumReached);
        assert_eq!(wait.required, 0);
    }

    #[tokio::test]
    async fn test_request_authorization_names_requirement() {
        let channel = Arc::new(MockChannel::new(vec![]));
        let tracker = tracker(channel.clone());

        tracker.request_authorization(0.5).await.unwrap();

        assert!(channel.sent()[0].contains("2 of 4"));
    }
}
