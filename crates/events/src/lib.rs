//! # memberhub Events Crate
//!
//! Side-channel writers used by the member workflow:
//!
//! - **Kafka**: JSON events on the configured topic, carrying W3C trace context headers
//! - **MongoDB**: legacy documents mirroring newly registered members

pub mod error;
pub mod kafka;
pub mod mongo;
pub mod propagation;

pub use error::{EventError, EventResult};
pub use kafka::KafkaEventProducer;
pub use mongo::MongoDocumentStore;
