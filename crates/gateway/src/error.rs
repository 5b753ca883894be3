//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use memberhub_members::MemberError;
use serde_json::{json, Value};
use thiserror::Error;

/// Reason reported for every 5xx response.
pub const INTERNAL_ERROR: &str = "INTERNAL SERVER ERROR";

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            GatewayError::DatabaseError(_)
            | GatewayError::ServiceError(_)
            | GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the client and written to the response log.
    pub fn body(&self) -> Value {
        let status = self.status_code();
        let reason = if status.is_server_error() {
            INTERNAL_ERROR.to_string()
        } else {
            status
                .canonical_reason()
                .unwrap_or("ERROR")
                .to_uppercase()
        };

        json!({
            "error": reason,
            "details": self.to_string(),
        })
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<MemberError> for GatewayError {
    fn from(error: MemberError) -> Self {
        match error {
            MemberError::MissingUserId => GatewayError::InvalidRequest(error.to_string()),
            MemberError::AlreadyExists(_) | MemberError::Store(_) => {
                GatewayError::DatabaseError(error.to_string())
            }
            MemberError::DocumentStore(_) | MemberError::EventBus(_) | MemberError::Facts(_) => {
                GatewayError::ServiceError(error.to_string())
            }
        }
    }
}
