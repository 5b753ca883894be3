//! REST API endpoints for the gateway

pub mod authenticate;
pub mod health;
pub mod login;
pub mod members;

use axum::{
    body::Bytes,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::GatewayState;

/// Error body shared by every endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

/// Body of `/authenticate` and `/members`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserIdRequest {
    pub user_id: String,
}

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/login", post(login::login))
        .route("/authenticate", post(authenticate::authenticate))
        .route("/members", post(members::lookup_member))
        .route("/health", get(health::health_check))
}

/// Decode a request body leniently; anything that is not JSON becomes `null`.
pub(crate) fn parse_payload(body: &Bytes) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// `userId` from a payload, accepting either a string or a number.
///
/// Zero counts as absent, like an empty string.
pub(crate) fn user_id(payload: &Value) -> Option<String> {
    match payload.get("userId")? {
        Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
        Value::Number(id) if !is_zero(id) => Some(id.to_string()),
        _ => None,
    }
}

fn is_zero(number: &serde_json::Number) -> bool {
    number.as_f64() == Some(0.0)
}
