use coachtrust_core::ErrorTrackingSettings;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "coachtrust=debug,tower_http=debug";

/// Initialize console tracing.
///
/// A subscriber that is already installed (e.g. by a test harness) is kept.
pub fn init_telemetry(error_tracking: &ErrorTrackingSettings) {
    // Console: compact format, filter from RUST_LOG when set.
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    let installed = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(console_fmt)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }

    if error_tracking.enabled() {
        tracing::info!(
            environment = %error_tracking.environment,
            traces_sample_rate = error_tracking.traces_sample_rate,
            event_level = %error_tracking.log_level,
            "Error tracking configured"
        );
    } else {
        tracing::info!("Error tracking disabled (SENTRY_DSN not set)");
    }
}
