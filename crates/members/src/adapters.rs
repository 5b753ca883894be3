//! Port implementations over the real backends.

use async_trait::async_trait;
use memberhub_database::{CreateMemberRequest, MemberRepository};
use memberhub_events::{KafkaEventProducer, MongoDocumentStore};

use crate::error::MemberResult;
use crate::model::{LegacyMemberRecord, Member, MemberEvent};
use crate::ports::{EventPublisher, LegacyStore, MemberStore};

#[async_trait]
impl MemberStore for MemberRepository {
    async fn find(&self, user_id: &str) -> MemberResult<Option<Member>> {
        Ok(self.find_by_user_id(user_id).await?.map(Member::from))
    }

    async fn insert(&self, member: &Member) -> MemberResult<Member> {
        let request = CreateMemberRequest {
            user_id: member.user_id.clone(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
        };
        Ok(self.create(&request).await?.into())
    }
}

#[async_trait]
impl LegacyStore for MongoDocumentStore {
    async fn record(&self, record: &LegacyMemberRecord) -> MemberResult<()> {
        self.insert(record).await?;
        Ok(())
    }
}

#[async_trait]
impl EventPublisher for KafkaEventProducer {
    async fn publish(&self, event: &MemberEvent) -> MemberResult<()> {
        KafkaEventProducer::publish(self, event.key(), event).await?;
        Ok(())
    }
}
