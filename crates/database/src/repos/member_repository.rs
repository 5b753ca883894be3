//! Member repository for database operations.

use sqlx::PgPool;
use tracing::debug;

use crate::entities::{CreateMemberRequest, MemberRecord};
use crate::types::{DatabaseError, DatabaseResult};

/// Repository for member database operations
#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find member by user ID
    pub async fn find_by_user_id(&self, user_id: &str) -> DatabaseResult<Option<MemberRecord>> {
        let member = sqlx::query_as::<_, MemberRecord>(
            "SELECT user_id, first_name, last_name, created_at FROM members WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(user_id, found = member.is_some(), "member lookup");
        Ok(member)
    }

    /// Insert a new member row
    pub async fn create(&self, request: &CreateMemberRequest) -> DatabaseResult<MemberRecord> {
        request.validate().map_err(DatabaseError::QueryError)?;

        let member = sqlx::query_as::<_, MemberRecord>(
            r#"
            INSERT INTO members (user_id, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING user_id, first_name, last_name, created_at
            "#,
        )
        .bind(&request.user_id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    /// List members, newest first
    pub async fn list(&self, limit: i64) -> DatabaseResult<Vec<MemberRecord>> {
        let members = sqlx::query_as::<_, MemberRecord>(
            "SELECT user_id, first_name, last_name, created_at FROM members ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn count(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
