//! Login: hands out a random identity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::metrics::MemberMetrics;
use crate::simulation::Simulation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
}

pub struct LoginService {
    simulation: Arc<Simulation>,
    metrics: MemberMetrics,
}

impl LoginService {
    pub fn new(simulation: Arc<Simulation>, metrics: MemberMetrics) -> Self {
        Self {
            simulation,
            metrics,
        }
    }

    #[instrument(skip(self))]
    pub fn login(&self, transaction_id: &str) -> LoginResponse {
        let user_id = self.simulation.next_user_id();
        self.metrics.record_login();
        info!(%user_id, "issued login identity");
        LoginResponse { user_id }
    }
}
