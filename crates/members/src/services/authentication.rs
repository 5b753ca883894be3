//! Authentication with randomly injected rejections.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::{MemberError, MemberResult};
use crate::metrics::MemberMetrics;
use crate::model::MemberEvent;
use crate::ports::EventPublisher;
use crate::simulation::Simulation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponse {
    pub user_id: String,
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AuthenticationResponse),
    Rejected { user_id: String },
}

pub struct AuthenticationService {
    simulation: Arc<Simulation>,
    publisher: Arc<dyn EventPublisher>,
    metrics: MemberMetrics,
}

impl AuthenticationService {
    pub fn new(
        simulation: Arc<Simulation>,
        publisher: Arc<dyn EventPublisher>,
        metrics: MemberMetrics,
    ) -> Self {
        Self {
            simulation,
            publisher,
            metrics,
        }
    }

    /// Authenticate `user_id`, rejecting a configured share of attempts at random.
    ///
    /// A rejection emits an `authentication failed` event; publishing problems
    /// are logged and never change the outcome.
    #[instrument(skip(self))]
    pub async fn authenticate(
        &self,
        transaction_id: &str,
        user_id: Option<&str>,
    ) -> MemberResult<AuthOutcome> {
        let user_id = user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(MemberError::MissingUserId)?;

        if !self.simulation.should_reject() {
            return Ok(AuthOutcome::Authenticated(AuthenticationResponse {
                user_id: user_id.to_string(),
                authenticated: true,
            }));
        }

        info!(user_id, "authentication rejected");
        self.metrics.record_failed_authentication("simulated");

        let event = MemberEvent::authentication_failed(transaction_id, user_id);
        if let Err(error) = self.publisher.publish(&event).await {
            warn!(%error, "failed to publish authentication failure event");
        }

        Ok(AuthOutcome::Rejected {
            user_id: user_id.to_string(),
        })
    }
}
