//! Confirmation use case
//!
//! Asks the group a yes/no question and measures the yes votes against the
//! whole roster, not against whoever happened to answer.

use crate::ports::channel::ChannelError;
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use crate::use_cases::collect_responses::ResponseCollector;
use huddle_domain::{ConfirmationResult, QuorumRule};
use std::time::Duration;
use tracing::info;

pub struct ConfirmationResolver {
    collector: ResponseCollector,
    rule: QuorumRule,
}

impl ConfirmationResolver {
    /// Resolver with the half-of-roster rule
    pub fn new(collector: ResponseCollector) -> Self {
        Self {
            collector,
            rule: QuorumRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: QuorumRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn rule(&self) -> &QuorumRule {
        &self.rule
    }

    /// Ask once and resolve after the first reply or the timeout
    pub async fn confirm(
        &self,
        prompt: &str,
        roster_size: usize,
        timeout: Duration,
    ) -> Result<ConfirmationResult, ChannelError> {
        self.confirm_with_progress(prompt, roster_size, timeout, 1, &NoProgress)
            .await
    }

    /// Ask once and wait for `min_responses` replies or the timeout
    pub async fn confirm_with_progress(
        &self,
        prompt: &str,
        roster_size: usize,
        timeout: Duration,
        min_responses: usize,
        progress: &dyn StageProgressNotifier,
    ) -> Result<ConfirmationResult, ChannelError> {
        let responses = self
            .collector
            .collect_with_progress(prompt, timeout, min_responses, progress)
            .await?;

        let result = ConfirmationResult::from_responses(&responses, roster_size, &self.rule);
        info!(
            "Confirmation {}: {} yes of {} required ({})",
            if result.confirmed { "passed" } else { "failed" },
            result.yes_count,
            result.required,
            result.vote_summary()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::channel::ChannelId;
    use crate::use_cases::test_support::{MockChannel, Script, reply};
    use std::sync::Arc;

    fn resolver(script: Script) -> ConfirmationResolver {
        let channel = Arc::new(MockChannel::new(vec![script]));
        ConfirmationResolver::new(ResponseCollector::new(channel, ChannelId::new("C-test")))
    }

    async fn confirm_all(script: Script) -> ConfirmationResult {
        resolver(script)
            .confirm_with_progress("Go?", 4, Duration::from_secs(60), 4, &NoProgress)
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_of_four_yes_confirms() {
        let result = confirm_all(vec![
            reply(1, "alice", "yes"),
            reply(2, "bob", "YES!"),
            reply(3, "carol", "no"),
            reply(4, "dave", "maybe"),
        ])
        .await;

        assert!(result.confirmed);
        assert_eq!(result.yes_count, 2);
        assert_eq!(result.required, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_of_four_yes_rejects() {
        let result = confirm_all(vec![
            reply(1, "alice", "y"),
            reply(2, "bob", "no"),
            reply(3, "carol", "nope"),
            reply(4, "dave", "n"),
        ])
        .await;

        assert!(!result.confirmed);
        assert_eq!(result.yes_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_thumbs_up_counts_as_yes() {
        let result = confirm_all(vec![reply(1, "alice", "👍"), reply(2, "bob", "👍🏽")]).await;

        assert!(result.confirmed);
        assert_eq!(result.yes_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_silence_counts_against_the_roster() {
        let result = confirm_all(vec![reply(1, "alice", "yes")]).await;

        assert!(!result.confirmed);
        assert_eq!(result.silent_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_resolves_on_first_reply() {
        let resolver = resolver(vec![reply(1, "alice", "yes"), reply(5, "bob", "yes")]);

        let result = resolver
            .confirm("Go?", 2, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(result.votes.len(), 1);
        assert!(result.confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unanimous_rule() {
        let resolver = resolver(vec![reply(1, "alice", "yes"), reply(2, "bob", "no")])
            .with_rule(QuorumRule::Unanimous);

        let result = resolver
            .confirm_with_progress("Go?", 2, Duration::from_secs(60), 2, &NoProgress)
            .await
            .unwrap();

        assert!(!result.confirmed);
        assert_eq!(result.required, 2);
    }
}
