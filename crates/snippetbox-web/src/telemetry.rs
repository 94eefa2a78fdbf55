//! Global tracing subscriber setup.
//!
//! `RUST_LOG` overrides the default filter. Records emitted through the
//! `log` facade (sqlx does this) are forwarded into tracing.

use crate::cli::LogFormatArg;
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,sqlx=warn,tower_http=debug";

/// Installs the global subscriber. Must be called once, before any tracing
/// macro is used.
pub fn init(format: LogFormatArg) -> Result<(), Box<dyn std::error::Error>> {
    LogTracer::init()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormatArg::Text => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().with_target(true)),
        )?,
        LogFormatArg::Json => tracing::subscriber::set_global_default(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            ),
        )?,
    }

    Ok(())
}
