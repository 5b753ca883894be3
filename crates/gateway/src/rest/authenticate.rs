use axum::{body::Bytes, extract::State, response::Response};
use memberhub_members::{AuthOutcome, AuthenticationResponse};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{GatewayError, GatewayResult};
use crate::rest::{parse_payload, user_id};
use crate::state::GatewayState;
use crate::transaction::TransactionLog;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationBody {
    pub user_id: String,
    pub authenticated: bool,
}

impl From<AuthenticationResponse> for AuthenticationBody {
    fn from(response: AuthenticationResponse) -> Self {
        Self {
            user_id: response.user_id,
            authenticated: response.authenticated,
        }
    }
}

#[utoipa::path(
    post,
    path = "/authenticate",
    tag = "members",
    request_body = super::UserIdRequest,
    responses(
        (status = 200, description = "Member authenticated", body = AuthenticationBody),
        (status = 400, description = "userId missing", body = super::ErrorResponse),
        (status = 401, description = "Authentication rejected", body = super::ErrorResponse)
    )
)]
pub async fn authenticate(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    let payload = parse_payload(&body);
    let transaction = TransactionLog::begin("authenticate", &payload);
    let result = run(&state, transaction.id(), user_id(&payload).as_deref()).await;
    transaction.respond(result)
}

async fn run(
    state: &GatewayState,
    transaction_id: &str,
    user_id: Option<&str>,
) -> GatewayResult<AuthenticationBody> {
    match state
        .authentication_service()
        .authenticate(transaction_id, user_id)
        .await?
    {
        AuthOutcome::Authenticated(response) => Ok(response.into()),
        AuthOutcome::Rejected { user_id } => Err(GatewayError::AuthenticationFailed(format!(
            "user {user_id} could not be authenticated"
        ))),
    }
}
