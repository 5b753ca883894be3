//! Seams between the workflows and the systems they talk to.

use async_trait::async_trait;

use crate::error::MemberResult;
use crate::model::{LegacyMemberRecord, Member, MemberEvent};

/// Relational member storage
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn find(&self, user_id: &str) -> MemberResult<Option<Member>>;

    /// Insert a member; a concurrent insert of the same id yields
    /// [`MemberError::AlreadyExists`](crate::MemberError::AlreadyExists).
    async fn insert(&self, member: &Member) -> MemberResult<Member>;
}

/// Document store that mirrors new members for the legacy welcome process
#[async_trait]
pub trait LegacyStore: Send + Sync {
    async fn record(&self, record: &LegacyMemberRecord) -> MemberResult<()>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &MemberEvent) -> MemberResult<()>;
}

/// Trivia appended to member profiles
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self) -> MemberResult<String>;
}
