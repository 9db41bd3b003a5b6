//! Logging and tracing initialisation.
//!
//! Logs go to stdout through `tracing-subscriber`. With the
//! `observability` feature, spans are also bridged to OpenTelemetry and
//! exported to stdout, and a meter provider is installed so LLM call
//! metrics are exported too.

use crate::LoggingSettings;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "observability")]
use opentelemetry::{KeyValue, global, trace::TracerProvider};
#[cfg(feature = "observability")]
use opentelemetry_sdk::{Resource, metrics::SdkMeterProvider, trace::SdkTracerProvider};

/// Configuration for logging and telemetry.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name for telemetry attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON-formatted logs
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Configuration for the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new("depot-server")
    }
}

impl From<&LoggingSettings> for ObservabilityConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self::default()
            .with_log_level(settings.level().clone())
            .with_json_logs(*settings.json())
    }
}

/// Keeps telemetry providers alive; flushes them on drop.
#[derive(Debug, Default)]
pub struct ObservabilityGuard {
    #[cfg(feature = "observability")]
    tracer: Option<SdkTracerProvider>,
    #[cfg(feature = "observability")]
    meter: Option<SdkMeterProvider>,
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        #[cfg(feature = "observability")]
        {
            if let Some(Err(e)) = self.tracer.take().map(|t| t.shutdown()) {
                eprintln!("Failed to shut down tracer provider: {e}");
            }
            if let Some(Err(e)) = self.meter.take().map(|m| m.shutdown()) {
                eprintln!("Failed to shut down meter provider: {e}");
            }
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a
/// global subscriber is already installed.
pub fn init_observability(
    config: &ObservabilityConfig,
) -> Result<ObservabilityGuard, Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(feature = "observability")]
    {
        let resource = Resource::builder()
            .with_service_name(config.service_name.clone())
            .with_attributes(vec![KeyValue::new(
                "service.version",
                config.service_version.clone(),
            )])
            .build();

        let tracer_provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .with_resource(resource.clone())
            .build();
        global::set_tracer_provider(tracer_provider.clone());

        let meter_provider = SdkMeterProvider::builder()
            .with_periodic_exporter(opentelemetry_stdout::MetricExporter::default())
            .with_resource(resource)
            .build();
        global::set_meter_provider(meter_provider.clone());

        let tracer = tracer_provider.tracer(config.service_name.clone());
        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;

        Ok(ObservabilityGuard {
            tracer: Some(tracer_provider),
            meter: Some(meter_provider),
        })
    }

    #[cfg(not(feature = "observability"))]
    {
        registry.try_init()?;
        Ok(ObservabilityGuard::default())
    }
}
