//! Middleware for tracing and request logging

use axum::{
    body::Body,
    extract::Request,
    http::{Method, Response},
    middleware::Next,
};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    trace::{DefaultOnRequest, TraceLayer},
};
use tracing::{field::Empty, info_span, Level, Span};

use crate::otel::set_parent_from_headers;

type MakeSpanFn = fn(&Request<Body>) -> Span;
type OnResponseFn = fn(&Response<Body>, Duration, &Span);

fn make_request_span(request: &Request<Body>) -> Span {
    let span = info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        status = Empty,
        transaction_id = Empty,
        trace_id = Empty,
    );
    set_parent_from_headers(&span, request.headers());
    span
}

fn record_response(response: &Response<Body>, _latency: Duration, span: &Span) {
    span.record("status", response.status().as_u16());
}

/// Create tracing middleware
///
/// Every request span is parented on an inbound `traceparent`, so spans
/// exported from here join the caller's trace.
pub fn create_trace_middleware(
) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeSpanFn, DefaultOnRequest, OnResponseFn>
{
    TraceLayer::new_for_http()
        .make_span_with(make_request_span as MakeSpanFn)
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(record_response as OnResponseFn)
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> axum::response::Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

pub fn create_cors_middleware() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Keeps the last value written to every span field.
    #[derive(Clone, Default)]
    struct FieldCapture(Arc<Mutex<HashMap<String, String>>>);

    impl FieldCapture {
        fn get(&self, field: &str) -> Option<String> {
            self.0.lock().unwrap().get(field).cloned()
        }
    }

    struct Collect<'a>(&'a mut HashMap<String, String>);

    impl Visit for Collect<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{value:?}"));
        }
    }

    impl<S: Subscriber> Layer<S> for FieldCapture {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            attrs.record(&mut Collect(&mut self.0.lock().unwrap()));
        }

        fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
            values.record(&mut Collect(&mut self.0.lock().unwrap()));
        }
    }

    fn request(traceparent: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::POST).uri("/login");
        if let Some(value) = traceparent {
            builder = builder.header("traceparent", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn request_span_records_inbound_trace_id_and_status() {
        let capture = FieldCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            let span = make_request_span(&request(Some(
                "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",
            )));
            let response = Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .body(Body::empty())
                .unwrap();
            record_response(&response, Duration::from_millis(3), &span);
        });

        assert_eq!(
            capture.get("trace_id").as_deref(),
            Some("4bf92f3577b34da6a3ce929d0e0e4736")
        );
        assert_eq!(capture.get("status").as_deref(), Some("401"));
        assert_eq!(capture.get("method").as_deref(), Some("POST"));
        assert_eq!(capture.get("uri").as_deref(), Some("/login"));
    }

    #[test]
    fn request_without_traceparent_leaves_trace_id_unset() {
        let capture = FieldCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            let _span = make_request_span(&request(None));
        });

        assert!(capture.get("trace_id").is_none());
        assert_eq!(capture.get("method").as_deref(), Some("POST"));
    }
}
