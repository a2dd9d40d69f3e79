//! Subscriber setup.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE_NAME: &str = "pickmenu-otlp.json";

/// Level used when the configuration names none.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

const SERVICE_NAME: &str = "pickmenu";

/// Installs the global tracing subscriber.
///
/// Spans and events at or above `config.trace_level` (an `EnvFilter`
/// directive, default `info`) are exported as OTLP/JSON to
/// `<data dir>/pickmenu-otlp.json`. Nothing is ever written to the terminal.
///
/// Returns the trace file path, or `None` if tracing could not be set up:
/// the data directory is missing and cannot be created, the level directive
/// is invalid, or a subscriber is already installed. Tracing is optional, so
/// none of these are errors.
///
/// # Example
///
/// ```rust,no_run
/// use pickmenu::observability::init_tracing;
/// use pickmenu::Config;
///
/// let config = Config {
///     trace_level: Some("pickmenu=debug".to_string()),
///     ..Default::default()
/// };
///
/// if let Some(path) = init_tracing(&config) {
///     tracing::debug!(path = %path.display(), "tracing active");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    let filter = EnvFilter::try_new(level).ok()?;

    let data_dir = paths::get_data_dir()?;
    std::fs::create_dir_all(&data_dir).ok()?;

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let trace_file = data_dir.join(TRACE_FILE_NAME);
    let provider = tracer::file_tracer_provider(
        trace_file.clone(),
        resource,
        SERVICE_NAME,
        RotationPolicy::default(),
    );
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(trace_file)
}
