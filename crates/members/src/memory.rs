//! In-memory port implementations for exercising the workflows without backends.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{MemberError, MemberResult};
use crate::model::{LegacyMemberRecord, Member, MemberEvent};
use crate::ports::{EventPublisher, FactSource, LegacyStore, MemberStore};

#[derive(Clone, Default)]
pub struct InMemoryMemberStore {
    members: Arc<RwLock<HashMap<String, Member>>>,
    pending: Arc<RwLock<Option<Member>>>,
    fail: bool,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, for error-path tests.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// A store where `member` is written by another writer between the first
    /// `find` and the following `insert`, so the insert hits a duplicate.
    pub fn preexisting_on_insert(member: Member) -> Self {
        Self {
            pending: Arc::new(RwLock::new(Some(member))),
            ..Self::default()
        }
    }

    pub async fn seed(&self, member: Member) {
        self.members
            .write()
            .await
            .insert(member.user_id.clone(), member);
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }

    fn check(&self) -> MemberResult<()> {
        if self.fail {
            return Err(MemberError::Store("member store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn find(&self, user_id: &str) -> MemberResult<Option<Member>> {
        self.check()?;
        Ok(self.members.read().await.get(user_id).cloned())
    }

    async fn insert(&self, member: &Member) -> MemberResult<Member> {
        self.check()?;
        let mut members = self.members.write().await;
        if let Some(winner) = self.pending.write().await.take() {
            members.insert(winner.user_id.clone(), winner);
        }
        if members.contains_key(&member.user_id) {
            return Err(MemberError::AlreadyExists(member.user_id.clone()));
        }
        members.insert(member.user_id.clone(), member.clone());
        Ok(member.clone())
    }
}

/// Legacy store that keeps every record it is handed
#[derive(Clone, Default)]
pub struct RecordingLegacyStore {
    records: Arc<RwLock<Vec<LegacyMemberRecord>>>,
    fail: bool,
}

impl RecordingLegacyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn records(&self) -> Vec<LegacyMemberRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl LegacyStore for RecordingLegacyStore {
    async fn record(&self, record: &LegacyMemberRecord) -> MemberResult<()> {
        if self.fail {
            return Err(MemberError::DocumentStore("document store unavailable".to_string()));
        }
        self.records.write().await.push(record.clone());
        Ok(())
    }
}

/// Publisher that keeps every event it is handed
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<RwLock<Vec<MemberEvent>>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn events(&self) -> Vec<MemberEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: &MemberEvent) -> MemberResult<()> {
        if self.fail {
            return Err(MemberError::EventBus("event bus unavailable".to_string()));
        }
        self.events.write().await.push(event.clone());
        Ok(())
    }
}

/// Always returns the same fact
#[derive(Debug, Clone)]
pub struct FixedFact(pub String);

#[async_trait]
impl FactSource for FixedFact {
    async fn fetch_fact(&self) -> MemberResult<String> {
        Ok(self.0.clone())
    }
}
