use axum::{body::Bytes, extract::State, response::Response};
use memberhub_members::LoginResponse;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::rest::parse_payload;
use crate::state::GatewayState;
use crate::transaction::TransactionLog;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub user_id: String,
}

impl From<LoginResponse> for LoginBody {
    fn from(response: LoginResponse) -> Self {
        Self {
            user_id: response.user_id,
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "members",
    responses(
        (status = 200, description = "Randomly issued identity", body = LoginBody)
    )
)]
pub async fn login(State(state): State<Arc<GatewayState>>, body: Bytes) -> Response {
    let transaction = TransactionLog::begin("login", &parse_payload(&body));
    let response = state.login_service().login(transaction.id());
    transaction.respond(Ok(LoginBody::from(response)))
}
