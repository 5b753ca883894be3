//! Member workflow records as they appear on the wire and in the stores.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const REGISTERED_USER: &str = "registered user";
pub const AUTHENTICATION_FAILED: &str = "authentication failed";

/// A member as stored in the relational database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<memberhub_database::MemberRecord> for Member {
    fn from(record: memberhub_database::MemberRecord) -> Self {
        Self {
            user_id: record.user_id,
            first_name: record.first_name,
            last_name: record.last_name,
        }
    }
}

/// Body returned by the member endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    #[serde(flatten)]
    pub member: Member,
    pub cat_fact: String,
}

/// Outcome of a member lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLookup {
    pub profile: MemberProfile,
    /// True when the member did not exist and was registered by this request.
    pub created: bool,
}

/// Document written to the legacy store when a member registers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyMemberRecord {
    pub id: String,
    pub user: Member,
    pub timestamp: String,
}

impl LegacyMemberRecord {
    pub fn new(transaction_id: &str, member: &Member) -> Self {
        Self {
            id: transaction_id.to_string(),
            user: member.clone(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

/// Event emitted on the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEvent {
    pub id: String,
    pub message: String,
    pub user: serde_json::Value,
}

impl MemberEvent {
    pub fn registered(transaction_id: &str, member: &Member) -> Self {
        Self {
            id: transaction_id.to_string(),
            message: REGISTERED_USER.to_string(),
            user: json!(member),
        }
    }

    pub fn authentication_failed(transaction_id: &str, user_id: &str) -> Self {
        Self {
            id: transaction_id.to_string(),
            message: AUTHENTICATION_FAILED.to_string(),
            user: json!({ "userId": user_id }),
        }
    }

    /// Bus partitioning key.
    pub fn key(&self) -> Option<&str> {
        self.user.get("userId").and_then(|value| value.as_str())
    }
}
