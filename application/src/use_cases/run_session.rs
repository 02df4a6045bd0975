//! Run Session use case
//!
//! Drives a session through its ordered stages: render the prompt, collect
//! replies, aggregate them into one value, then ask the planning
//! collaborator for whatever the next stages need.

use crate::ports::channel::ChannelError;
use crate::ports::planner::{PlannerError, PlanningCollaborator};
use crate::ports::progress::{NoProgress, StageProgressNotifier};
use crate::ports::session_logger::{NoSessionLogger, SessionEvent, SessionLogger};
use crate::use_cases::collect_responses::ResponseCollector;
use crate::use_cases::confirm::ConfirmationResolver;
use futures::future::try_join_all;
use huddle_domain::{
    AggregationContext, AggregationPolicy, DomainError, PlanKind, PromptTemplate, Recommendation,
    ResolvedValue, Roster, SessionArtifact, SessionState, StageDefinition,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that end a session
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Planning collaborator failed for {kind}: {source}")]
    Collaborator {
        kind: PlanKind,
        #[source]
        source: PlannerError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl OrchestratorError {
    /// Short reason suitable for the group apology
    pub fn reason(&self) -> &'static str {
        match self {
            OrchestratorError::Channel(_) => "the chat connection failed",
            OrchestratorError::Collaborator { .. } => "I couldn't get suggestions",
            OrchestratorError::Domain(_) => "the session is misconfigured",
        }
    }
}

/// Use case for running a staged group session
pub struct StageOrchestrator {
    collector: ResponseCollector,
    planner: Arc<dyn PlanningCollaborator>,
    city: String,
    logger: Arc<dyn SessionLogger>,
}

impl StageOrchestrator {
    pub fn new(
        collector: ResponseCollector,
        planner: Arc<dyn PlanningCollaborator>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            collector,
            planner,
            city: city.into(),
            logger: Arc::new(NoSessionLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn SessionLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run with default (no-op) progress
    pub async fn run(
        &self,
        stages: &[StageDefinition],
        roster: &Roster,
    ) -> Result<SessionArtifact, OrchestratorError> {
        self.run_with_progress(stages, roster, &NoProgress).await
    }

    /// Run every stage in order and deliver one summary message
    ///
    /// On any fatal error the group gets exactly one apology and no
    /// summary.
    pub async fn run_with_progress(
        &self,
        stages: &[StageDefinition],
        roster: &Roster,
        progress: &dyn StageProgressNotifier,
    ) -> Result<SessionArtifact, OrchestratorError> {
        if roster.is_empty() {
            return Err(DomainError::EmptyRoster.into());
        }
        if stages.is_empty() {
            return Err(DomainError::NoStages.into());
        }

        info!(
            "Starting session in {} with {} participants, {} stages",
            self.city,
            roster.len(),
            stages.len()
        );

        match self.execute(stages, roster, progress).await {
            Ok(artifact) => Ok(artifact),
            Err(e) => {
                error!("Session aborted: {}", e);
                self.logger.log(SessionEvent::new(
                    "session_failed",
                    serde_json::json!({ "error": e.to_string() }),
                ));
                if let Err(send_err) = self.collector.send(&PromptTemplate::apology(e.reason())).await {
                    warn!("Could not deliver apology: {}", send_err);
                }
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        stages: &[StageDefinition],
        roster: &Roster,
        progress: &dyn StageProgressNotifier,
    ) -> Result<SessionArtifact, OrchestratorError> {
        let mut state = SessionState::new(self.city.clone(), roster.len());

        for (index, stage) in stages.iter().enumerate() {
            self.run_stage(stage, index, stages.len(), &mut state, progress)
                .await?;
        }

        let artifact = state.into_artifact(roster);
        self.collector
            .send(&PromptTemplate::artifact_summary(&artifact))
            .await?;
        info!("Session complete; summary delivered");
        Ok(artifact)
    }

    async fn run_stage(
        &self,
        stage: &StageDefinition,
        index: usize,
        total: usize,
        state: &mut SessionState,
        progress: &dyn StageProgressNotifier,
    ) -> Result<(), OrchestratorError> {
        let prompt = stage.render_prompt(state);
        let ctx = AggregationContext {
            option_count: stage.option_count(state),
            roster_size: state.roster_size(),
        };

        info!("Stage {}/{}: {}", index + 1, total, stage.id);
        progress.on_stage_start(&stage.id, index, total);
        self.logger.log(SessionEvent::new(
            "stage_started",
            serde_json::json!({
                "stage": stage.id.as_str(),
                "index": index,
                "prompt": prompt,
                "option_count": ctx.option_count,
            }),
        ));

        let value = match &stage.aggregation {
            AggregationPolicy::Confirmation { rule } => {
                let result = ConfirmationResolver::new(self.collector.clone())
                    .with_rule(*rule)
                    .confirm_with_progress(
                        &prompt,
                        ctx.roster_size,
                        stage.timeout,
                        stage.min_responses,
                        progress,
                    )
                    .await?;
                ResolvedValue::from(&result)
            }
            policy => {
                let responses = self
                    .collector
                    .collect_with_progress(&prompt, stage.timeout, stage.min_responses, progress)
                    .await?;
                policy.aggregate(&responses, ctx)
            }
        };

        if value.is_default() {
            debug!("Stage {} fell back to its default", stage.id);
        }

        if let (Some(kind), Some(choice)) = (stage.choices_from, value.as_choice()) {
            match state.plan(kind).get(choice).cloned() {
                Some(selection) => state.select(stage.id.clone(), selection),
                None => debug!("Stage {} has no {} to select from", stage.id, kind),
            }
        }

        info!("Stage {} resolved: {}", stage.id, value);
        progress.on_stage_complete(&stage.id, &value);
        self.logger.log(SessionEvent::new(
            "stage_resolved",
            serde_json::json!({
                "stage": stage.id.as_str(),
                "value": value,
                "selection": state.selection(&stage.id).map(|r| r.name.as_str()),
            }),
        ));
        state.resolve(stage.id.clone(), value);

        if !stage.planning.is_empty() {
            for (kind, recommendations) in self.plan(stage, state).await? {
                info!("Received {} {} suggestions", recommendations.len(), kind);
                self.logger.log(SessionEvent::new(
                    "plan_received",
                    serde_json::json!({
                        "kind": kind,
                        "recommendations": recommendations,
                    }),
                ));
                state.record_plan(kind, recommendations);
            }
        }

        Ok(())
    }

    /// Call the collaborator for each kind the stage names, concurrently
    async fn plan(
        &self,
        stage: &StageDefinition,
        state: &SessionState,
    ) -> Result<Vec<(PlanKind, Vec<Recommendation>)>, OrchestratorError> {
        let requests: Vec<_> = stage
            .planning
            .iter()
            .map(|kind| state.plan_request(*kind))
            .collect();

        try_join_all(requests.iter().map(|request| async move {
            self.planner
                .plan(request)
                .await
                .map(|recommendations| (request.kind, recommendations))
                .map_err(|source| OrchestratorError::Collaborator {
                    kind: request.kind,
                    source,
                })
        }))
        .await
    }
}
