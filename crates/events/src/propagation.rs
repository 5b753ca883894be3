//! W3C trace-context propagation into event record headers.

use std::collections::BTreeMap;

use opentelemetry::{global, propagation::Injector};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Header name carrying the W3C trace context
pub const TRACEPARENT: &str = "traceparent";

/// Adapter writing propagator fields into record headers
struct RecordHeadersInjector<'a>(&'a mut BTreeMap<String, Vec<u8>>);

impl Injector for RecordHeadersInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value.into_bytes());
    }
}

/// Inject the context of the current `tracing` span into the given headers.
///
/// Leaves the headers untouched when no propagator is installed or the span
/// is not sampled.
pub fn inject_current_context(headers: &mut BTreeMap<String, Vec<u8>>) {
    let cx = Span::current().context();
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(&cx, &mut RecordHeadersInjector(headers));
    });
}
