//! Planning service client over HTTP.
//!
//! Posts the [`PlanRequest`] as JSON and parses the raw response body with
//! the domain's recommendation parser, which repairs a truncated array once
//! before giving up.

use async_trait::async_trait;
use huddle_application::ports::planner::{PlannerError, PlanningCollaborator};
use huddle_domain::{PlanRequest, Recommendation, parse_recommendations};
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpPlanner {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpPlanner {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn recommendations_from_body(body: &str) -> Result<Vec<Recommendation>, PlannerError> {
    parse_recommendations(body).map_err(|e| PlannerError::Malformed(e.to_string()))
}

#[async_trait]
impl PlanningCollaborator for HttpPlanner {
    async fn plan(&self, request: &PlanRequest) -> Result<Vec<Recommendation>, PlannerError> {
        debug!("Requesting {} for {} from {}", request.kind, request.city, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlannerError::Timeout
                } else {
                    PlannerError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlannerError::RequestFailed(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PlannerError::RequestFailed(e.to_string()))?;

        recommendations_from_body(&body).inspect_err(|e| {
            warn!("Planner returned an unusable {} payload: {}", request.kind, e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_body() {
        let recommendations = recommendations_from_body(
            r#"{"recommendations":[{"name":"Tram 28","estimated_cost_per_person":3.0,"best":true}]}"#,
        )
        .unwrap();

        assert_eq!(recommendations.len(), 1);
        assert!(recommendations[0].best);
    }

    #[test]
    fn test_truncated_body_is_repaired() {
        let recommendations =
            recommendations_from_body(r#"[{"name":"Belém"},{"name":"Alfama"},{"name":"LX Fa"#)
                .unwrap();

        assert_eq!(
            recommendations
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Belém", "Alfama"]
        );
    }

    #[test]
    fn test_garbage_body_is_malformed() {
        let err = recommendations_from_body("Sorry, I can't help with that").unwrap_err();
        assert!(err.is_malformed());
    }
}
