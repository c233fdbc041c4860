use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize tracing output according to the observability settings.
///
/// `RUST_LOG` takes precedence over the configured log level when set.
pub fn init_telemetry(cfg: &ObservabilityConfig) -> Result<()> {
    if !cfg.tracing_enabled {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.clone()));

    if cfg.json_logs {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .with(filter)
            .init();
    }

    tracing::debug!("docflow telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the reports of one run
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span with common lifecycle attributes
pub fn create_lifecycle_span(
    operation: &str,
    author: &str,
    correlation_id: Option<&str>,
) -> tracing::Span {
    tracing::info_span!(
        "document_lifecycle",
        operation = operation,
        document.author = author,
        correlation.id = correlation_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_ids_are_unique() {
        assert_ne!(generate_correlation_id(), generate_correlation_id());
    }
}
