//! Event bus producer backed by Kafka.
//!
//! The partition client is connected lazily on the first publish so the
//! service can start while the broker is still coming up.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use memberhub_config::KafkaConfig;
use rskafka::client::partition::{Compression, PartitionClient, UnknownTopicHandling};
use rskafka::client::ClientBuilder;
use rskafka::record::Record;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::error::{EventError, EventResult};
use crate::propagation::inject_current_context;

/// Serialise an event body and wrap it in a record addressed by `key`.
pub fn build_record<T: Serialize>(key: Option<&str>, payload: &T) -> EventResult<Record> {
    let mut headers = BTreeMap::new();
    inject_current_context(&mut headers);

    Ok(Record {
        key: key.map(|key| key.as_bytes().to_vec()),
        value: Some(serde_json::to_vec(payload)?),
        headers,
        timestamp: Utc::now(),
    })
}

pub struct KafkaEventProducer {
    config: KafkaConfig,
    client: OnceCell<PartitionClient>,
}

impl KafkaEventProducer {
    pub fn new(config: KafkaConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.config.topic
    }

    async fn partition_client(&self) -> EventResult<&PartitionClient> {
        self.client
            .get_or_try_init(|| async {
                let timeout = Duration::from_secs(self.config.connect_timeout_seconds);
                let connect = async {
                    let client = ClientBuilder::new(self.config.brokers())
                        .build()
                        .await
                        .map_err(|e| EventError::BusConnection(e.to_string()))?;
                    client
                        .partition_client(
                            self.config.topic.clone(),
                            self.config.partition,
                            UnknownTopicHandling::Retry,
                        )
                        .await
                        .map_err(|e| EventError::BusConnection(e.to_string()))
                };

                let partition = tokio::time::timeout(timeout, connect)
                    .await
                    .map_err(|_| EventError::Timeout(self.config.connect_timeout_seconds))??;

                info!(
                    topic = %self.config.topic,
                    partition = self.config.partition,
                    "connected to event bus"
                );
                Ok::<_, EventError>(partition)
            })
            .await
    }

    /// Publish one JSON event, keyed by `key` when given.
    #[instrument(skip(self, payload), fields(topic = %self.config.topic))]
    pub async fn publish<T: Serialize + Sync>(&self, key: Option<&str>, payload: &T) -> EventResult<()> {
        let record = build_record(key, payload)?;
        let client = self.partition_client().await?;

        let offsets = client
            .produce(vec![record], Compression::NoCompression)
            .await
            .map_err(|e| EventError::BusPublish(e.to_string()))?;

        debug!(?offsets, "published to event bus");
        Ok(())
    }
}
