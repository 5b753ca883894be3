//! Per-request transaction logging.
//!
//! Each endpoint opens a [`TransactionLog`] on entry, which assigns a
//! transaction id and logs the request, and closes it with the response.

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, Span};
use uuid::Uuid;

use crate::error::GatewayResult;

/// Response header echoing the transaction id.
pub const TRANSACTION_ID_HEADER: &str = "x-transaction-id";

pub struct TransactionLog {
    component: &'static str,
    transaction_id: String,
}

impl TransactionLog {
    pub fn begin(component: &'static str, payload: &Value) -> Self {
        let transaction_id = Uuid::new_v4().to_string();
        Span::current().record("transaction_id", transaction_id.as_str());

        info!(
            message = "Request",
            component,
            transaction_id = %transaction_id,
            payload = %payload,
        );

        Self {
            component,
            transaction_id,
        }
    }

    pub fn id(&self) -> &str {
        &self.transaction_id
    }

    fn log_response(&self, status: StatusCode, payload: &Value) {
        info!(
            message = "Response",
            component = self.component,
            transaction_id = %self.transaction_id,
            return_code = status.as_u16(),
            payload = %payload,
        );
    }

    /// Log the outcome and turn it into the HTTP response.
    pub fn respond<T: Serialize>(self, result: GatewayResult<T>) -> Response {
        let (status, payload) = match result {
            Ok(body) => match serde_json::to_value(body) {
                Ok(payload) => (StatusCode::OK, payload),
                Err(error) => {
                    let error = crate::error::GatewayError::InternalError(error.to_string());
                    (error.status_code(), error.body())
                }
            },
            Err(error) => (error.status_code(), error.body()),
        };

        self.log_response(status, &payload);

        let mut response = (status, Json(payload)).into_response();
        if let Ok(value) = HeaderValue::from_str(&self.transaction_id) {
            response.headers_mut().insert(TRANSACTION_ID_HEADER, value);
        }
        response
    }
}
