use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Initialize structured logging for a fleet run.
///
/// Diagnostics go to stderr through `tracing`; human-facing progress stays on
/// stdout. The filter honors `RUST_LOG` and defaults to INFO.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    Ok(())
}

/// Generate a correlation ID linking every operation of one run
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping one whole fleet run
pub fn create_run_span(mode: &str, run_id: &str) -> tracing::Span {
    tracing::info_span!("fleet_run", mode = mode, run.id = run_id)
}
