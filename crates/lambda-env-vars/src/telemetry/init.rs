//! Tracing subscriber with JSON logs on stderr and optional OTLP export.

use anyhow::{Context, Result};
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides `log_level`; spans are
/// exported over OTLP/gRPC only when `otlp_endpoint` is set.
///
/// # Errors
///
/// Returns an error if the exporter cannot start or a subscriber is already set.
pub fn init_telemetry(otlp_endpoint: Option<&str>, log_level: &str) -> Result<()> {
    let otel_layer = otlp_endpoint
        .map(|endpoint| {
            opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_endpoint(endpoint))
                .with_trace_config(trace::Config::default().with_resource(Resource::new([
                    KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
                ])))
                .install_batch(runtime::Tokio)
                .context("failed to install OTLP exporter")
        })
        .transpose()?
        .map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .with(otel_layer)
        .try_init()
        .context("failed to initialise tracing subscriber")
}
