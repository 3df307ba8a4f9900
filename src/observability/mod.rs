//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → newsdesk-otlp.json
//! ```
//!
//! The trace file lives in the plugin data directory and rotates past 5 MiB,
//! keeping two numbered backups. The level comes from the `trace_level`
//! plugin option and defaults to `info`; any `EnvFilter` directive works,
//! e.g. `newsdesk::app=debug,info`.
//!
//! ```rust,no_run
//! use newsdesk::observability::init_tracing;
//! use newsdesk::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing is now active");
//! ```

mod exporter;
mod rotating;

use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "newsdesk-otlp.json";

const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Idempotent: only the first call installs a subscriber. Observability is
/// optional, so a data directory that cannot be created skips setup silently
/// and an unparsable `trace_level` falls back to `info`.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);

    let data_dir = crate::infrastructure::paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", "Newsdesk")]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let tracer = provider.tracer(exporter::SCOPE_NAME);

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
