//! Member entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `members` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberRecord {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request for inserting a new member row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl CreateMemberRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("user_id cannot be empty".to_string());
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err("member names cannot be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_fields() {
        let mut request = CreateMemberRequest {
            user_id: "42".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        };
        assert!(request.validate().is_ok());

        request.user_id = "  ".into();
        assert!(request.validate().is_err());

        request.user_id = "42".into();
        request.last_name = String::new();
        assert!(request.validate().is_err());
    }
}
