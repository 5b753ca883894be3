//! # memberhub Gateway Crate
//!
//! The HTTP surface of memberhub: routes requests to the member services
//! and turns their outcomes into JSON responses.
//!
//! ## Architecture
//!
//! - **REST**: `/login`, `/authenticate`, `/members` and `/health`
//! - **Docs**: OpenAPI document at `/api-docs/openapi.json`
//! - **Transaction log**: `Request`/`Response` records per call
//! - **Middleware**: trace context, CORS and request logging
//!
//! ## Usage
//!
//! ```rust,ignore
//! use memberhub_gateway::{create_router, GatewayState};
//!
//! let state = GatewayState::new(login, authentication, members);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod docs;
pub mod error;
pub mod middleware;
pub mod otel;
pub mod rest;
pub mod state;
pub mod transaction;

pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;
pub use transaction::{TransactionLog, TRANSACTION_ID_HEADER};

pub use create_router as build_router;

use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);
    Router::new()
        .merge(rest::create_rest_routes())
        .merge(docs::create_docs_routes())
        .with_state(arc_state)
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::create_trace_middleware())
}
