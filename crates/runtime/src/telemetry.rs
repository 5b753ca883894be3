//! Logging, tracing and metrics setup.
//!
//! Logs always go to stdout through `tracing-subscriber`. When an OTLP
//! endpoint is configured, spans and metrics are exported to it as well.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use memberhub_config::TelemetryConfig;
use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider},
    propagation::TraceContextPropagator,
    trace::SdkTracerProvider,
    Resource,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::system_metrics::SystemMetrics;

/// Keeps the exporters alive; dropping it flushes and shuts them down.
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
    _system_metrics: Option<SystemMetrics>,
}

impl TelemetryGuard {
    pub fn is_exporting(&self) -> bool {
        self.tracer_provider.is_some() || self.meter_provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.meter_provider.take() {
            if let Err(error) = provider.shutdown() {
                warn!(%error, "failed to shut down meter provider");
            }
        }
        if let Some(provider) = self.tracer_provider.take() {
            if let Err(error) = provider.shutdown() {
                warn!(%error, "failed to shut down tracer provider");
            }
        }
    }
}

/// `RUST_LOG` wins over the configured level.
pub fn build_env_filter(config: &TelemetryConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level {:?}", config.log_level)),
    }
}

fn build_resource(config: &TelemetryConfig) -> Resource {
    Resource::builder_empty()
        .with_attributes([KeyValue::new("service.name", config.service_name.clone())])
        .build()
}

fn build_tracer_provider(endpoint: &str, resource: Resource) -> Result<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("failed to build OTLP span exporter")?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build())
}

fn build_meter_provider(
    endpoint: &str,
    interval: Duration,
    resource: Resource,
) -> Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .context("failed to build OTLP metric exporter")?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(interval)
        .build();

    Ok(SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(resource)
        .build())
}

/// Install the global subscriber, propagator and, when configured, the OTLP
/// tracer and meter providers.
///
/// Fails if a global subscriber is already set.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let filter = build_env_filter(config)?;
    let resource = build_resource(config);

    let tracer_provider = config
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| build_tracer_provider(endpoint, resource.clone()))
        .transpose()?;

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name.clone()))
    });

    let fmt_layer = if config.json_logs {
        fmt::layer().json().with_current_span(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|error| anyhow!("failed to set tracing subscriber: {error}"))?;

    if let Some(provider) = &tracer_provider {
        global::set_tracer_provider(provider.clone());
    }

    let meter_provider = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let provider = build_meter_provider(
                endpoint,
                Duration::from_secs(config.metrics_interval_seconds.max(1)),
                resource,
            )?;
            global::set_meter_provider(provider.clone());
            Some(provider)
        }
        None => None,
    };

    let system_metrics = if meter_provider.is_some() && config.system_metrics {
        Some(SystemMetrics::register(&global::meter(
            memberhub_members::metrics::METER_NAME,
        ))?)
    } else {
        None
    };

    match config.otlp_endpoint.as_deref() {
        Some(endpoint) => info!(%endpoint, service = %config.service_name, "exporting telemetry over OTLP"),
        None => info!(service = %config.service_name, "OTLP endpoint not configured, logging only"),
    }

    Ok(TelemetryGuard {
        tracer_provider,
        meter_provider,
        _system_metrics: system_metrics,
    })
}
