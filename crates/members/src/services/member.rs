//! Member lookup, registering unknown ids on the fly.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{MemberError, MemberResult};
use crate::metrics::MemberMetrics;
use crate::model::{LegacyMemberRecord, Member, MemberEvent, MemberLookup, MemberProfile};
use crate::ports::{EventPublisher, FactSource, LegacyStore, MemberStore};
use crate::simulation::Simulation;

pub struct MemberService {
    store: Arc<dyn MemberStore>,
    legacy: Arc<dyn LegacyStore>,
    publisher: Arc<dyn EventPublisher>,
    facts: Arc<dyn FactSource>,
    simulation: Arc<Simulation>,
    metrics: MemberMetrics,
}

impl MemberService {
    pub fn new(
        store: Arc<dyn MemberStore>,
        legacy: Arc<dyn LegacyStore>,
        publisher: Arc<dyn EventPublisher>,
        facts: Arc<dyn FactSource>,
        simulation: Arc<Simulation>,
        metrics: MemberMetrics,
    ) -> Self {
        Self {
            store,
            legacy,
            publisher,
            facts,
            simulation,
            metrics,
        }
    }

    /// Look up `user_id`, registering a made-up member when it is unknown.
    #[instrument(skip(self))]
    pub async fn lookup(&self, transaction_id: &str, user_id: Option<&str>) -> MemberResult<MemberLookup> {
        let user_id = user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(MemberError::MissingUserId)?;

        let (member, created) = match self.store.find(user_id).await? {
            Some(member) => (member, false),
            None => self.register(transaction_id, user_id).await?,
        };

        let cat_fact = self.facts.fetch_fact().await?;

        Ok(MemberLookup {
            profile: MemberProfile { member, cat_fact },
            created,
        })
    }

    async fn register(&self, transaction_id: &str, user_id: &str) -> MemberResult<(Member, bool)> {
        let (first_name, last_name) = self.simulation.fake_name();
        let candidate = Member {
            user_id: user_id.to_string(),
            first_name,
            last_name,
        };

        let member = match self.store.insert(&candidate).await {
            Ok(member) => member,
            Err(MemberError::AlreadyExists(_)) => {
                // Lost a race with a concurrent registration of the same id.
                let existing = self.store.find(user_id).await?.ok_or_else(|| {
                    MemberError::Store(format!("member {user_id} vanished after conflict"))
                })?;
                return Ok((existing, false));
            }
            Err(error) => return Err(error),
        };
        info!(user_id, "registered new member");

        let record = LegacyMemberRecord::new(transaction_id, &member);
        if let Err(error) = self.legacy.record(&record).await {
            warn!(%error, "failed to write legacy member record");
        }

        let event = MemberEvent::registered(transaction_id, &member);
        if let Err(error) = self.publisher.publish(&event).await {
            warn!(%error, "failed to publish member registration event");
        }

        self.metrics.record_new_member();
        Ok((member, true))
    }
}
