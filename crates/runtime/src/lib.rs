use std::sync::Arc;

use anyhow::{Context, Result};
use memberhub_config::AppConfig;
use memberhub_database::{initialize_database, MemberRepository};
use memberhub_events::{KafkaEventProducer, MongoDocumentStore};
use memberhub_gateway::GatewayState;
use memberhub_members::{
    AuthenticationService, EventPublisher, FactSource, HttpFactSource, LegacyStore, LoginService,
    MemberMetrics, MemberService, MemberStore, NoFacts, Simulation,
};
use sqlx::PgPool;
use tracing::info;

pub mod system_metrics;
pub mod telemetry;

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: PgPool,
    pub store: Arc<dyn MemberStore>,
    pub legacy: Arc<dyn LegacyStore>,
    pub publisher: Arc<dyn EventPublisher>,
    pub facts: Arc<dyn FactSource>,
    pub simulation: Arc<Simulation>,
    pub metrics: MemberMetrics,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let legacy = MongoDocumentStore::connect(&config.mongodb)
            .await
            .context("failed to configure document store")?;
        info!(collection = legacy.collection_name(), "document store configured");

        let publisher = KafkaEventProducer::new(config.kafka.clone());
        info!(topic = publisher.topic(), "event producer configured");

        let facts: Arc<dyn FactSource> = if config.facts.enabled {
            Arc::new(HttpFactSource::new(&config.facts).context("failed to build fact client")?)
        } else {
            info!("cat facts disabled");
            Arc::new(NoFacts)
        };

        Ok(Self {
            store: Arc::new(MemberRepository::new(db_pool.clone())),
            db_pool,
            legacy: Arc::new(legacy),
            publisher: Arc::new(publisher),
            facts,
            simulation: Arc::new(Simulation::from_config(&config.simulation)),
            metrics: MemberMetrics::from_global(),
        })
    }

    /// Services the HTTP gateway routes to.
    pub fn gateway_state(&self) -> GatewayState {
        GatewayState::new(
            Arc::new(LoginService::new(
                Arc::clone(&self.simulation),
                self.metrics.clone(),
            )),
            Arc::new(AuthenticationService::new(
                Arc::clone(&self.simulation),
                Arc::clone(&self.publisher),
                self.metrics.clone(),
            )),
            Arc::new(MemberService::new(
                Arc::clone(&self.store),
                Arc::clone(&self.legacy),
                Arc::clone(&self.publisher),
                Arc::clone(&self.facts),
                Arc::clone(&self.simulation),
                self.metrics.clone(),
            )),
        )
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
