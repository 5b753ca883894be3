//! Error types for the event layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event encoding error: {0}")]
    Encoding(String),

    #[error("Event bus connection error: {0}")]
    BusConnection(String),

    #[error("Event bus publish error: {0}")]
    BusPublish(String),

    #[error("Document store error: {0}")]
    DocumentStore(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),
}

impl From<serde_json::Error> for EventError {
    fn from(error: serde_json::Error) -> Self {
        EventError::Encoding(error.to_string())
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(error: mongodb::error::Error) -> Self {
        EventError::DocumentStore(error.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(error: mongodb::bson::ser::Error) -> Self {
        EventError::Encoding(error.to_string())
    }
}

pub type EventResult<T> = Result<T, EventError>;
