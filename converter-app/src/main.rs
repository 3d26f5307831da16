//! # Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the provider adapters
//! - Create the conversion service and its symbol cache
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_hex::{ConversionService, SymbolCache, inbound::HttpServer};
use converter_upstream::build_providers;

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("currency-converter"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing when a collector is configured
    let (otel_tracer, otel_provider) = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let (tracer, provider) = init_tracer(endpoint)?;
            (Some(tracer), Some(provider))
        }
        None => (None, None),
    };
    let telemetry = otel_tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,converter_app=debug,converter_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting currency converter on port {}", config.port);
    tracing::info!(
        symbols_url = %config.provider.symbols_url,
        rates_url = %config.provider.rates_url,
        otlp = config.otlp_endpoint.is_some(),
        "Using exchange rate provider"
    );

    // Build provider adapters sharing one HTTP client
    let (symbols, rates) = build_providers(&config.provider)?;

    // Create the conversion service with a process-wide symbol cache
    let service = ConversionService::new(symbols, rates, Arc::new(SymbolCache::new()));

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
