//! OpenAPI document for the REST endpoints.

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::rest;
use crate::state::GatewayState;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::login::login,
        rest::authenticate::authenticate,
        rest::members::lookup_member,
        rest::health::health_check,
    ),
    components(
        schemas(
            rest::ErrorResponse,
            rest::UserIdRequest,
            rest::login::LoginBody,
            rest::authenticate::AuthenticationBody,
            rest::members::MemberBody,
            rest::health::HealthResponse,
        )
    ),
    tags(
        (name = "members", description = "Member login, authentication and lookup"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_docs_routes() -> Router<Arc<GatewayState>> {
    Router::new().route(OPENAPI_PATH, get(openapi_json))
}
