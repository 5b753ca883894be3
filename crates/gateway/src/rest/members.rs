use axum::{body::Bytes, extract::State, response::Response};
use memberhub_members::MemberProfile;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::GatewayResult;
use crate::rest::{parse_payload, user_id};
use crate::state::GatewayState;
use crate::transaction::TransactionLog;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub cat_fact: String,
}

impl From<MemberProfile> for MemberBody {
    fn from(profile: MemberProfile) -> Self {
        Self {
            user_id: profile.member.user_id,
            first_name: profile.member.first_name,
            last_name: profile.member.last_name,
            cat_fact: profile.cat_fact,
        }
    }
}

/// Look up a member, registering unknown ids with a generated name.
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = super::UserIdRequest,
    responses(
        (status = 200, description = "Member profile", body = MemberBody),
        (status = 400, description = "userId missing", body = super::ErrorResponse),
        (status = 500, description = "Store or fact lookup failed", body = super::ErrorResponse)
    )
)]
pub async fn lookup_member(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    let payload = parse_payload(&body);
    let transaction = TransactionLog::begin("members", &payload);
    let result = run(&state, transaction.id(), user_id(&payload).as_deref()).await;
    transaction.respond(result)
}

async fn run(
    state: &GatewayState,
    transaction_id: &str,
    user_id: Option<&str>,
) -> GatewayResult<MemberBody> {
    let lookup = state.member_service().lookup(transaction_id, user_id).await?;
    Ok(lookup.profile.into())
}
