//! Error types for the member workflows

use memberhub_database::DatabaseError;
use memberhub_events::EventError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemberError {
    #[error("userId is required")]
    MissingUserId,

    #[error("Member already exists: {0}")]
    AlreadyExists(String),

    #[error("Member store error: {0}")]
    Store(String),

    #[error("Document store error: {0}")]
    DocumentStore(String),

    #[error("Event bus error: {0}")]
    EventBus(String),

    #[error("Fact lookup failed: {0}")]
    Facts(String),
}

impl From<DatabaseError> for MemberError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Duplicate(message) => MemberError::AlreadyExists(message),
            other => MemberError::Store(other.to_string()),
        }
    }
}

impl From<EventError> for MemberError {
    fn from(error: EventError) -> Self {
        match error {
            EventError::DocumentStore(message) => MemberError::DocumentStore(message),
            other => MemberError::EventBus(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for MemberError {
    fn from(error: reqwest::Error) -> Self {
        MemberError::Facts(error.to_string())
    }
}

pub type MemberResult<T> = Result<T, MemberError>;
