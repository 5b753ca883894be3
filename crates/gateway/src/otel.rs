//! W3C trace context extraction from inbound HTTP headers.

use axum::http::HeaderMap;
use opentelemetry::{global, propagation::Extractor};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT: &str = "traceparent";

struct HeadersExtractor<'a>(&'a HeaderMap);

impl<'a> Extractor for HeadersExtractor<'a> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

pub fn get_traceparent(headers: &HeaderMap) -> Option<&str> {
    headers.get(TRACEPARENT)?.to_str().ok()
}

/// Parse the trace id out of `00-{trace_id}-{span_id}-{flags}`.
pub fn parse_trace_id(traceparent: &str) -> Option<String> {
    let parts: Vec<&str> = traceparent.split('-').collect();
    if parts.len() >= 4 && parts[0] == "00" && parts[1].len() == 32 {
        Some(parts[1].to_string())
    } else {
        None
    }
}

/// Parent `span` on the caller's trace context and record its trace id.
pub fn set_parent_from_headers(span: &Span, headers: &HeaderMap) {
    let parent_cx =
        global::get_text_map_propagator(|propagator| propagator.extract(&HeadersExtractor(headers)));
    let _ = span.set_parent(parent_cx);

    if let Some(trace_id) = get_traceparent(headers).and_then(parse_trace_id) {
        span.record("trace_id", trace_id.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::info_span;

    const SAMPLE: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    #[test]
    fn traceparent_header_is_read() {
        let mut headers = HeaderMap::new();
        assert!(get_traceparent(&headers).is_none());

        headers.insert(TRACEPARENT, SAMPLE.parse().unwrap());
        assert_eq!(get_traceparent(&headers), Some(SAMPLE));
    }

    #[test]
    fn trace_id_is_parsed() {
        assert_eq!(
            parse_trace_id(SAMPLE).as_deref(),
            Some("4bf92f3577b34da6a3ce929d0e0e4736")
        );
        assert!(parse_trace_id("invalid").is_none());
        assert!(parse_trace_id("01-abc-def-00").is_none());
    }

    #[test]
    fn setting_parent_does_not_panic_without_provider() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACEPARENT, SAMPLE.parse().unwrap());

        let span = info_span!("test", trace_id = tracing::field::Empty);
        set_parent_from_headers(&span, &headers);
    }
}
